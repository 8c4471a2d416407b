//! In-memory directory provider.
//!
//! Serves a fixed group listing and substring contact search from memory.
//! Used by tests and by offline flows where no directory service is
//! reachable.

use async_trait::async_trait;

use handover_core::directory::{ContactRecord, GroupDirectory, GroupRecord};
use handover_core::error::Result;
use handover_core::item::{Item, normalize_contacts};
use handover_core::search::{ContactSearch, keyword_matches};

/// Directory provider backed by fixed record lists.
pub struct StaticDirectory {
    groups: Vec<GroupRecord>,
    contacts: Vec<ContactRecord>,
}

impl StaticDirectory {
    /// Creates a provider serving the given records.
    pub fn new(groups: Vec<GroupRecord>, contacts: Vec<ContactRecord>) -> Self {
        Self { groups, contacts }
    }

    /// Provider with nothing in it.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl GroupDirectory for StaticDirectory {
    async fn fetch_groups(&self) -> Result<Vec<GroupRecord>> {
        Ok(self.groups.clone())
    }
}

#[async_trait]
impl ContactSearch for StaticDirectory {
    async fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        let items = normalize_contacts(&self.contacts);
        Ok(items
            .into_iter()
            .filter(|item| keyword_matches(item, keyword))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str) -> ContactRecord {
        ContactRecord {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: None,
            avatar_path: None,
            is_me: false,
            is_bot: false,
        }
    }

    #[tokio::test]
    async fn test_search_filters_by_keyword() {
        let directory = StaticDirectory::new(
            Vec::new(),
            vec![contact("u1", "Alice"), contact("u2", "Bob")],
        );

        let hits = directory.search("ali").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "u1");
    }

    #[tokio::test]
    async fn test_empty_directory_returns_nothing() {
        let directory = StaticDirectory::empty();
        assert!(directory.fetch_groups().await.unwrap().is_empty());
        assert!(directory.search("anything").await.unwrap().is_empty());
    }
}
