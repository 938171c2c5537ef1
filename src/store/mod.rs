//! Persistence gateway for the product collection.
//!
//! Every operation is a single call against one logical table keyed by
//! `product_id`. Implementations never retry; failures are handed back to the
//! caller unchanged.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, UpdateOutcome};

pub use memory::MemoryProductStore;
pub use mongo::MongoProductStore;

/// Errors raised by a product store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Duplicate product id: {0}")]
    DuplicateKey(String),
    #[error("Store database error: {0}")]
    Database(String),
    #[error("Store timed out: {0}")]
    Timeout(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full scan. An empty collection yields an empty vec.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// `Ok(None)` when nothing matches; errors are transport faults only.
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Writes a new row. Uniqueness is the caller's job.
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// Removes at most one row. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn update_name_by_id(&self, id: &str, name: &str) -> Result<UpdateOutcome, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<(), StoreError>;
}
