/// Storage serialization utilities for chrome.storage.local

use crate::log_data::CloudwatchLogItem;
use serde::{Deserialize, Serialize};

/// Storage key for the saved-item list.
pub const STORAGE_KEY: &str = "cloudwatch-item";

/// Root storage structure: the stored JSON is the bare item array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredItems {
    pub items: Vec<CloudwatchLogItem>,
}

impl StoredItems {
    pub fn new() -> Self {
        StoredItems { items: Vec::new() }
    }

    /// The starter list seeded on first run, so the popup has something to
    /// suggest before the user imports their own.
    pub fn with_defaults() -> Self {
        StoredItems {
            items: vec![
                CloudwatchLogItem::Lambda {
                    name: Some("Create statement".to_string()),
                    lambda: "orders-create-statement".to_string(),
                },
                CloudwatchLogItem::Lambda {
                    name: None,
                    lambda: "orders-transfer-request".to_string(),
                },
                CloudwatchLogItem::Api {
                    api: "/v1/auth/signup-status".to_string(),
                    lambda: "auth-exists-qr".to_string(),
                },
                CloudwatchLogItem::Gateway {
                    gateway_name: "shop-backend".to_string(),
                    gateway_id: "a4db3j".to_string(),
                    stage: "api".to_string(),
                },
            ],
        }
    }

    pub fn append(&mut self, items: Vec<CloudwatchLogItem>) {
        self.items.extend(items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for StoredItems {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(lambda: &str) -> CloudwatchLogItem {
        CloudwatchLogItem::Lambda {
            name: None,
            lambda: lambda.to_string(),
        }
    }

    #[test]
    fn test_stored_items_new() {
        let stored = StoredItems::new();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut stored = StoredItems::new();

        stored.append(vec![create_test_item("fn-a"), create_test_item("fn-b")]);
        stored.append(vec![create_test_item("fn-c")]);

        assert_eq!(stored.len(), 3);
        assert_eq!(stored.items[2], create_test_item("fn-c"));
    }

    #[test]
    fn test_clear() {
        let mut stored = StoredItems::with_defaults();
        assert!(!stored.is_empty());

        stored.clear();

        assert!(stored.is_empty());
    }

    #[test]
    fn test_defaults_cover_all_variants() {
        let stored = StoredItems::with_defaults();

        assert!(stored
            .items
            .iter()
            .any(|item| matches!(item, CloudwatchLogItem::Lambda { .. })));
        assert!(stored
            .items
            .iter()
            .any(|item| matches!(item, CloudwatchLogItem::Api { .. })));
        assert!(stored
            .items
            .iter()
            .any(|item| matches!(item, CloudwatchLogItem::Gateway { .. })));
    }

    #[test]
    fn test_serialization_is_a_plain_array() {
        let stored = StoredItems {
            items: vec![create_test_item("fn-a")],
        };

        let json = serde_json::to_string(&stored).unwrap();
        assert_eq!(json, r#"[{"lambda":"fn-a"}]"#);

        let deserialized: StoredItems = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, stored);
    }
}
