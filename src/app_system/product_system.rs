use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actors::ProductService;
use crate::clients::ProductClient;
use crate::store::{ProductStore, StoreError};

/// Owns the running product service and the store it writes to.
///
/// The store is created by the caller and handed in; nothing in the process
/// reaches for it through a global.
pub struct ProductSystem {
    pub product_client: ProductClient,
    store: Arc<dyn ProductStore>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ProductSystem {
    #[instrument(name = "product_system", skip(store))]
    pub fn new(store: Arc<dyn ProductStore>, buffer_size: usize) -> Self {
        info!("Starting product system");

        let (product_service, product_client) = ProductService::new(buffer_size, Arc::clone(&store));
        let handles = vec![tokio::spawn(product_service.run())];

        info!("Product system started successfully");

        Self {
            product_client,
            store,
            handles,
        }
    }

    /// Stops the service, waits for it, then releases the store connection.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), StoreError> {
        info!("Shutting down product system");

        let _ = self.product_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        self.store.close().await?;

        info!("Product system shutdown complete");
        Ok(())
    }
}
