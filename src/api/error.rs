use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::response::ApiResponse;
use crate::product::{ErrorKind, ProductError, PRODUCT_ID_LEN};

pub const MSG_BAD_REQUEST: &str = "Invalid request body";
pub const MSG_ID_REQUIRED: &str = "Query Params Product ID is required";

/// An error on its way out as an error envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A body or query string that could not be decoded.
    pub fn malformed(detail: impl std::fmt::Display, message: &str) -> Self {
        warn!(error = %detail, "Malformed request");
        Self::new(ErrorKind::MalformedInput, message)
    }

    /// Maps a service failure to its public message. Internal failures get
    /// `internal_message`; the underlying detail only goes to the log.
    pub fn from_product(err: ProductError, internal_message: &str) -> Self {
        let kind = err.kind();
        let message = match &err {
            ProductError::InvalidLength { .. } => {
                format!("Product ID must be exactly {PRODUCT_ID_LEN} characters long")
            }
            ProductError::InvalidFormat(_) => "Product ID must be in the format \
                XXXXX-XXXXX-XXXXX-XXXXX-XXXXX-XXXXX and contain only uppercase letters and numbers"
                .to_string(),
            ProductError::AlreadyExists(_) => {
                "Product ID already exists, please use another ID".to_string()
            }
            ProductError::NotFound(_) => "Not found product to update".to_string(),
            ProductError::PatternError(_) => "Failed to validate product ID format".to_string(),
            ProductError::LookupError(_) => "Failed to check existing product".to_string(),
            ProductError::DatabaseError(_) | ProductError::ActorCommunicationError(_) => {
                internal_message.to_string()
            }
        };

        if kind == ErrorKind::InternalFailure {
            error!(error = %err, "{message}");
        } else {
            warn!(error = %err, "{message}");
        }

        Self { kind, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::failure(self.kind, self.message).into_response()
    }
}
