use std::fmt;

use chrono::Utc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::{ARCHIVE_PREFIX, DEFAULT_CATEGORIES, UNTITLED_LABEL};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn with_archive_prefix(&self) -> ItemId {
        ItemId(format!("{}{}", ARCHIVE_PREFIX, self.0))
    }

    pub fn without_archive_prefix(&self) -> ItemId {
        match self.0.strip_prefix(ARCHIVE_PREFIX) {
            Some(rest) => ItemId(rest.to_string()),
            None => self.clone(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SubItem {
    pub id: ItemId,
    pub name: String,
    pub img: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inclusions: Vec<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: ItemId,
    pub name: String,
    pub img: String,
    #[serde(default)]
    pub items: Vec<SubItem>,
}

impl CategoryItem {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNTITLED_LABEL
        } else {
            &self.name
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default = "seeded_categories")]
    pub active: Vec<CategoryItem>,
    #[serde(default)]
    pub archived: Vec<CategoryItem>,
}

impl CatalogSnapshot {
    pub fn seeded() -> Self {
        CatalogSnapshot {
            active: seeded_categories(),
            archived: Vec::new(),
        }
    }
}

pub fn seeded_categories() -> Vec<CategoryItem> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|d| CategoryItem {
            id: ItemId::new(d.id),
            name: d.name.to_string(),
            img: d.img.to_string(),
            items: Vec::new(),
        })
        .collect()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn slug_id(name: &str, token: i64) -> ItemId {
    let slug = name.to_lowercase().split_whitespace().join("-");
    ItemId(format!("{}-{}", slug, token))
}

pub fn sub_item_id(folder: &ItemId, token: i64) -> ItemId {
    ItemId(format!("{}-pkg-{}", folder.0, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_prefix_is_unconditional() {
        assert_eq!(ItemId::new("foo").with_archive_prefix().as_str(), "arch-foo");
        assert_eq!(
            ItemId::new("arch-foo").with_archive_prefix().as_str(),
            "arch-arch-foo"
        );
    }

    #[test]
    fn test_restore_strips_single_prefix() {
        assert_eq!(
            ItemId::new("arch-foo").without_archive_prefix().as_str(),
            "foo"
        );
        assert_eq!(
            ItemId::new("arch-arch-foo")
                .without_archive_prefix()
                .as_str(),
            "arch-foo"
        );
        assert_eq!(ItemId::new("bar").without_archive_prefix().as_str(), "bar");
    }

    #[test]
    fn test_slug_id_lowercases_and_joins() {
        assert_eq!(slug_id("Spring", 123).as_str(), "spring-123");
        assert_eq!(
            slug_id("Summer  Mini Session", 456).as_str(),
            "summer-mini-session-456"
        );
    }

    #[test]
    fn test_sub_item_id_format() {
        let folder = ItemId::new("regularcover");
        assert_eq!(sub_item_id(&folder, 99).as_str(), "regularcover-pkg-99");
    }

    #[test]
    fn test_seeded_snapshot_shape() {
        let snapshot = CatalogSnapshot::seeded();
        assert_eq!(snapshot.active.len(), 3);
        assert!(snapshot.archived.is_empty());
        assert_eq!(snapshot.active[0].id.as_str(), "regularcover");
        assert_eq!(snapshot.active[1].name, "Yearbook Packages");
        assert_eq!(snapshot.active[2].img, "images/packagelist/package3.png");
        assert!(snapshot.active.iter().all(|item| item.items.is_empty()));
    }

    #[test]
    fn test_snapshot_missing_fields_fall_back() {
        let snapshot: CatalogSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, CatalogSnapshot::seeded());

        let snapshot: CatalogSnapshot =
            serde_json::from_str(r#"{"active":[],"extra_field":true}"#).unwrap();
        assert!(snapshot.active.is_empty());
        assert!(snapshot.archived.is_empty());
    }

    #[test]
    fn test_sub_item_optional_fields_default() {
        let sub: SubItem = serde_json::from_str(
            r#"{"id":"regularcover-pkg-1","name":"Solo","img":"images/placeholder.jpg"}"#,
        )
        .unwrap();
        assert_eq!(sub.description, "");
        assert!(sub.inclusions.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_when_empty() {
        let mut item = seeded_categories().remove(0);
        assert_eq!(item.display_name(), "Regular Packages");
        item.name.clear();
        assert_eq!(item.display_name(), "Untitled");
    }
}
