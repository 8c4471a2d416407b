//! Raw directory record shapes as returned by providers.

use serde::{Deserialize, Serialize};

/// A group entry as returned by the group directory provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    /// Group identifier
    pub group_id: String,
    /// Display name of the group
    pub group_name: String,
    /// Member ids, if the provider exposes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    /// Avatar resource path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
}

/// A contact entry as returned by the contact directory provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Contact identifier
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar resource path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    /// True when this record refers to the current actor
    #[serde(default)]
    pub is_me: bool,
    /// True for bot accounts
    #[serde(default)]
    pub is_bot: bool,
}
