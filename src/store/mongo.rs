use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info, instrument};

use super::{ProductStore, StoreError};
use crate::domain::{Product, UpdateOutcome};

pub const COLLECTION_NAME: &str = "products";

/// Bound on connecting at startup and on disconnecting at shutdown.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed store over the `products` collection.
///
/// The client pools connections internally, so one instance is shared by
/// every in-flight request.
pub struct MongoProductStore {
    client: Client,
    database: String,
    collection: Collection<Product>,
}

impl MongoProductStore {
    /// Connects, pings and makes sure the unique index on `product_id`
    /// exists, all within [`CONNECTION_TIMEOUT`].
    #[instrument(skip(uri))]
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let connecting = async {
            let client = Client::with_options(client_options(uri).await?).map_err(database_error)?;

            let store = Self {
                collection: client.database(database).collection(COLLECTION_NAME),
                database: database.to_string(),
                client,
            };
            store.ping().await?;
            store.ensure_unique_index().await?;
            Ok::<_, StoreError>(store)
        };

        let store = tokio::time::timeout(CONNECTION_TIMEOUT, connecting)
            .await
            .map_err(|_| StoreError::Timeout(format!("connecting to {database}")))??;

        info!(database = %database, "Connected to MongoDB");
        Ok(store)
    }

    async fn ensure_unique_index(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "product_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection
            .create_index(index)
            .await
            .map_err(database_error)?;
        debug!("Unique index on product_id ensured");
        Ok(())
    }
}

/// Driver options as given by the URI. Startup is bounded by the outer
/// timeout in [`MongoProductStore::connect`], so per-operation timeouts stay
/// at the driver defaults.
async fn client_options(uri: &str) -> Result<ClientOptions, StoreError> {
    ClientOptions::parse(uri).await.map_err(database_error)
}

fn database_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await
            .map_err(database_error)?;
        cursor.try_collect().await.map_err(database_error)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        self.collection
            .find_one(doc! { "product_id": id })
            .projection(doc! { "_id": 0 })
            .await
            .map_err(database_error)
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        match self.collection.insert_one(&product).await {
            Ok(_) => Ok(product),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::DuplicateKey(product.product_id)),
            Err(err) => Err(database_error(err)),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! { "product_id": id })
            .await
            .map_err(database_error)?;
        Ok(())
    }

    async fn update_name_by_id(&self, id: &str, name: &str) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "product_id": id },
                doc! { "$set": { "product_name": name } },
            )
            .await
            .map_err(database_error)?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(database_error)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), StoreError> {
        tokio::time::timeout(CONNECTION_TIMEOUT, self.client.clone().shutdown())
            .await
            .map_err(|_| StoreError::Timeout("closing MongoDB connection".to_string()))?;
        info!("MongoDB connection closed");
        Ok(())
    }
}
