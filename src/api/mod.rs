//! HTTP surface: routes, envelope, CORS.
//!
//! | Route | Method |
//! |---|---|
//! | `/api/v1/products` | GET |
//! | `/api/v1/product` | POST |
//! | `/api/v1/product?id=` | DELETE, PUT |
//! | `/health` | GET |

pub mod cors;
pub mod error;
pub mod handlers;
pub mod response;

use axum::routing::get;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::clients::ProductClient;
use handlers::AppState;

pub fn router(product_client: ProductClient) -> Router {
    let v1 = Router::new()
        .route("/products", get(handlers::list_products))
        .route(
            "/product",
            axum::routing::post(handlers::create_product)
                .delete(handlers::delete_product)
                .put(handlers::rename_product),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", v1)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { product_client })
}
