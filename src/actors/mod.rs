use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::clients::ProductClient;
use crate::domain::{Product, UpdateOutcome};
use crate::messages::{ProductRequest, ServiceResponse};
use crate::product::{validate_product_id, ProductError};
use crate::store::ProductStore;

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

/// Product service actor.
///
/// Mutations are handled inline in the receive loop, one message at a time.
/// That makes the actor the single writer for the collection, so two
/// creations of the same `product_id` can never both pass the existence
/// check. Listings only read, and run on their own task.
pub struct ProductService {
    receiver: mpsc::Receiver<ProductRequest>,
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(buffer_size: usize, store: Arc<dyn ProductStore>) -> (Self, ProductClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = ProductClient::new(sender);
        (service, client)
    }

    #[instrument(name = "product_service", skip(self))]
    pub async fn run(mut self) {
        info!("ProductService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ProductRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                ProductRequest::CreateProduct {
                    product,
                    respond_to,
                } => {
                    self.handle_create_product(product, respond_to).await;
                }
                ProductRequest::DeleteProduct { id, respond_to } => {
                    self.handle_delete_product(id, respond_to).await;
                }
                ProductRequest::RenameProduct {
                    id,
                    product_name,
                    respond_to,
                } => {
                    self.handle_rename_product(id, product_name, respond_to)
                        .await;
                }
                ProductRequest::Shutdown => {
                    info!("ProductService shutting down");
                    break;
                }
            }
        }

        info!("ProductService stopped");
    }

    /// The spawned task owns `respond_to` and answers once the scan is done.
    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, ProductError>) {
        debug!("Processing list_products request");

        let store = Arc::clone(&self.store);
        tokio::spawn(
            async move {
                let result = store.list_all().await.map_err(ProductError::from);
                match &result {
                    Ok(products) => info!(product_count = products.len(), "Listed products"),
                    Err(e) => error!(error = %e, "Failed to list products"),
                }
                let _ = respond_to.send(result);
            }
            .in_current_span(),
        );
    }

    /// Validates, checks for an existing product with the same id, then inserts.
    ///
    /// Length and format are checked before the store is touched.
    #[instrument(
        fields(product_id = %product.product_id, product_name = %product.product_name),
        skip(self, product, respond_to)
    )]
    async fn handle_create_product(
        &mut self,
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    ) {
        debug!("Processing create_product request");

        if let Err(e) = validate_product_id(&product.product_id) {
            warn!(error = %e, "Product validation failed");
            send_error!(respond_to, e);
        }

        match self.store.find_by_id(&product.product_id).await {
            Ok(None) => debug!("Product id is free"),
            Ok(Some(_)) => {
                warn!("Product already exists");
                send_error!(
                    respond_to,
                    ProductError::AlreadyExists(product.product_id.clone())
                );
            }
            Err(e) => {
                error!(error = %e, "Failed to check existing product");
                send_error!(respond_to, ProductError::LookupError(e.to_string()));
            }
        }

        let result = self.store.insert(product).await.map_err(ProductError::from);
        match &result {
            Ok(_) => info!("Product created successfully"),
            Err(e) => error!(error = %e, "Failed to create product"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    async fn handle_delete_product(&mut self, id: String, respond_to: ServiceResponse<(), ProductError>) {
        debug!("Processing delete_product request");

        let result = self.store.delete_by_id(&id).await.map_err(ProductError::from);
        match &result {
            Ok(()) => info!("Product deleted"),
            Err(e) => error!(error = %e, "Failed to delete product"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id, product_name = %product_name), skip(self, respond_to))]
    async fn handle_rename_product(
        &mut self,
        id: String,
        product_name: String,
        respond_to: ServiceResponse<UpdateOutcome, ProductError>,
    ) {
        debug!("Processing rename_product request");

        let result = match self.store.update_name_by_id(&id, &product_name).await {
            Ok(outcome) if outcome.matched_count == 0 => {
                warn!("No product to rename");
                Err(ProductError::NotFound(id))
            }
            Ok(outcome) => {
                info!(modified = outcome.modified_count, "Product renamed");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "Failed to rename product");
                Err(ProductError::from(e))
            }
        };
        let _ = respond_to.send(result);
    }
}
