use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the store's own document id. Never accepted from clients.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Represents a product in the catalog.
///
/// `product_id` is the business key. Fields other than the id and the name
/// are kept in `extra` and stored without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    #[cfg(test)]
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            extra: Map::new(),
        }
    }

    /// Drops a client-supplied `_id` so the store keeps choosing its own key.
    /// Returns whether one was present.
    pub fn strip_internal_id(&mut self) -> bool {
        self.extra.remove(INTERNAL_ID_FIELD).is_some()
    }
}

/// Payload for renaming an existing product. A missing name renames to `""`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRename {
    #[serde(default)]
    pub product_name: String,
}

/// Result of a rename, as reported by the store.
///
/// A `matched_count` of zero means no product carries the requested id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}
