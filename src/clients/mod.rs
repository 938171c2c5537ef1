#[macro_use]
mod macros;

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{Product, UpdateOutcome};
use crate::messages::ProductRequest;
use crate::product::ProductError;

/// Client for the product service. Cheap to clone; one per HTTP handler
/// invocation is fine.
#[derive(Clone)]
pub struct ProductClient {
    sender: mpsc::Sender<ProductRequest>,
}

impl ProductClient {
    pub fn new(sender: mpsc::Sender<ProductRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ProductError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ProductRequest::Shutdown)
            .await
            .map_err(|_| ProductError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(ProductClient => fn list_products() -> Vec<Product> as ProductRequest::ListProducts, Error = ProductError);
client_method!(ProductClient => fn create_product(product: Product) -> Product as ProductRequest::CreateProduct, Error = ProductError);
client_method!(ProductClient => fn delete_product(id: String) -> () as ProductRequest::DeleteProduct, Error = ProductError);
client_method!(ProductClient => fn rename_product(id: String, product_name: String) -> UpdateOutcome as ProductRequest::RenameProduct, Error = ProductError);
