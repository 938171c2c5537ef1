use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::{ApiError, MSG_BAD_REQUEST, MSG_ID_REQUIRED};
use super::response::ApiResponse;
use crate::clients::ProductClient;
use crate::domain::{Product, ProductRename, UpdateOutcome};
use crate::product::ErrorKind;

#[derive(Clone)]
pub struct AppState {
    pub product_client: ProductClient,
}

/// `?id=<product_id>`
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

fn require_id(query: Result<Query<IdQuery>, QueryRejection>) -> Result<String, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::malformed(rejection, MSG_ID_REQUIRED))?;
    match query.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::new(ErrorKind::MalformedInput, MSG_ID_REQUIRED)),
    }
}

pub async fn health() -> ApiResponse<Health> {
    ApiResponse::success(StatusCode::OK, Health { status: "ok" }, "Service is healthy")
}

pub async fn not_found() -> ApiError {
    ApiError::new(ErrorKind::NotFound, "Route not found")
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::new(ErrorKind::MethodNotAllowed, "Method Not Allowed")
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state
        .product_client
        .list_products()
        .await
        .map_err(|e| ApiError::from_product(e, "Failed to retrieve products"))?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        products,
        "Products retrieved successfully",
    ))
}

#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Product>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(mut product) = body.map_err(|rejection| ApiError::malformed(rejection, MSG_BAD_REQUEST))?;
    if product.strip_internal_id() {
        debug!("Ignoring client-supplied _id");
    }

    let created = state
        .product_client
        .create_product(product)
        .await
        .map_err(|e| ApiError::from_product(e, "Failed to create product"))?;

    Ok(ApiResponse::success(
        StatusCode::CREATED,
        created,
        "Product created successfully",
    ))
}

#[instrument(skip(state, query))]
pub async fn delete_product(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<()> {
    let id = require_id(query)?;

    state
        .product_client
        .delete_product(id)
        .await
        .map_err(|e| ApiError::from_product(e, "Failed to delete product"))?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        (),
        "Product deleted successfully",
    ))
}

#[instrument(skip(state, query, body))]
pub async fn rename_product(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Json<ProductRename>, JsonRejection>,
) -> ApiResult<UpdateOutcome> {
    let id = require_id(query)?;
    let Json(rename) = body.map_err(|rejection| ApiError::malformed(rejection, MSG_BAD_REQUEST))?;

    let outcome = state
        .product_client
        .rename_product(id, rename.product_name)
        .await
        .map_err(|e| ApiError::from_product(e, "Failed to update product"))?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        outcome,
        "update successfully",
    ))
}
