//! Normalization of raw directory records into the uniform `Item` shape.
//!
//! Pure and infallible: absent fields stay `None`, and the kind is assigned
//! from the source collection.

use crate::directory::{ContactRecord, GroupRecord};
use crate::item::{Item, ItemKind};

/// Maps raw group records into group items.
pub fn normalize_groups(records: &[GroupRecord]) -> Vec<Item> {
    records
        .iter()
        .map(|record| Item {
            id: record.group_id.clone(),
            kind: ItemKind::Group,
            name: Some(record.group_name.clone()),
            email: None,
            avatar_path: record.avatar_path.clone(),
            members: record.members.clone(),
            is_me: false,
            is_bot: false,
        })
        .collect()
}

/// Maps raw contact records into direct items.
pub fn normalize_contacts(records: &[ContactRecord]) -> Vec<Item> {
    records
        .iter()
        .map(|record| Item {
            id: record.id.clone(),
            kind: ItemKind::Direct,
            name: record.name.clone(),
            email: record.email.clone(),
            avatar_path: record.avatar_path.clone(),
            members: None,
            is_me: record.is_me,
            is_bot: record.is_bot,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, name: &str) -> GroupRecord {
        GroupRecord {
            group_id: id.to_string(),
            group_name: name.to_string(),
            members: None,
            avatar_path: None,
        }
    }

    #[test]
    fn test_normalize_groups_assigns_group_kind() {
        let items = normalize_groups(&[group("g1", "Team A")]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "g1");
        assert_eq!(items[0].kind, ItemKind::Group);
        assert_eq!(items[0].name.as_deref(), Some("Team A"));
        assert!(items[0].email.is_none());
    }

    #[test]
    fn test_normalize_groups_keeps_members() {
        let mut record = group("g1", "Team A");
        record.members = Some(vec!["u1".to_string(), "u2".to_string()]);
        let items = normalize_groups(&[record]);
        assert_eq!(
            items[0].members.as_deref(),
            Some(["u1".to_string(), "u2".to_string()].as_slice())
        );
    }

    #[test]
    fn test_normalize_contacts_assigns_direct_kind() {
        let record = ContactRecord {
            id: "u1".to_string(),
            name: Some("Bob".to_string()),
            email: Some("bob@corp".to_string()),
            avatar_path: None,
            is_me: false,
            is_bot: true,
        };
        let items = normalize_contacts(&[record]);
        assert_eq!(items[0].kind, ItemKind::Direct);
        assert_eq!(items[0].email.as_deref(), Some("bob@corp"));
        assert!(items[0].is_bot);
        assert!(items[0].members.is_none());
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_groups(&[]).is_empty());
        assert!(normalize_contacts(&[]).is_empty());
    }
}
