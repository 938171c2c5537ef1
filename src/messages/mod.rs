use tokio::sync::oneshot;

use crate::domain::{Product, UpdateOutcome};
use crate::product::ProductError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by the product service. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum ProductRequest {
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, ProductError>,
    },
    CreateProduct {
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    },
    DeleteProduct {
        id: String,
        respond_to: ServiceResponse<(), ProductError>,
    },
    RenameProduct {
        id: String,
        product_name: String,
        respond_to: ServiceResponse<UpdateOutcome, ProductError>,
    },
    Shutdown,
}
