//! # Mock Framework
//!
//! Utilities for testing code that talks to the product service without
//! running the service itself.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! channel, then helpers like [`expect_create`] to assert on each request and
//! answer it.

use tokio::sync::mpsc;

use crate::clients::ProductClient;
use crate::domain::{Product, UpdateOutcome};
use crate::messages::{ProductRequest, ServiceResponse};
use crate::product::ProductError;

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (ProductClient, mpsc::Receiver<ProductRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ProductClient::new(sender), receiver)
}

pub async fn expect_list(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<ServiceResponse<Vec<Product>, ProductError>> {
    match receiver.recv().await {
        Some(ProductRequest::ListProducts { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_create(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(Product, ServiceResponse<Product, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::CreateProduct { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(String, ServiceResponse<(), ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::DeleteProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_rename(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(String, String, ServiceResponse<UpdateOutcome, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::RenameProduct {
            id,
            product_name,
            respond_to,
        }) => Some((id, product_name, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "ABCDE-12345-ABCDE-12345-ABCDE-12345";

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task =
            tokio::spawn(async move { client.create_product(Product::new(ID, "Widget")).await });

        let (product, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(product.product_name, "Widget");
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn test_mock_client_rename_passes_fields() {
        let (client, mut receiver) = create_mock_client(10);

        let rename_task = tokio::spawn(async move {
            client.rename_product(ID.to_string(), "Gadget".to_string()).await
        });

        let (id, name, responder) = expect_rename(&mut receiver).await.expect("Expected Rename request");
        assert_eq!(id, ID);
        assert_eq!(name, "Gadget");
        responder.send(Err(ProductError::NotFound(id))).unwrap();

        let result = rename_task.await.unwrap();
        assert_eq!(result, Err(ProductError::NotFound(ID.to_string())));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let delete_task = tokio::spawn(async move { client.delete_product(ID.to_string()).await });

        let (_, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        drop(responder);

        let result = delete_task.await.unwrap();
        assert_eq!(
            result,
            Err(ProductError::ActorCommunicationError("Actor dropped".to_string()))
        );
    }

    #[tokio::test]
    async fn test_closed_receiver_is_a_communication_error() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        let result = client.list_products().await;
        assert_eq!(
            result,
            Err(ProductError::ActorCommunicationError("Actor closed".to_string()))
        );
    }
}
