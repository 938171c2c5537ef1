use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};

use crate::product::ErrorKind;

/// Uniform JSON envelope around every response body:
/// `{ "status", "code", "message", "data" }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        code: StatusCode,
        message: String,
        data: T,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl<T> ApiResponse<T> {
    pub fn success(code: StatusCode, data: T, message: impl Into<String>) -> Self {
        ApiResponse::Success {
            code,
            message: message.into(),
            data,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiResponse::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiResponse::Success { code, .. } => *code,
            ApiResponse::Failure { kind, .. } => status_for(*kind),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MalformedInput | ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    status: &'static str,
    code: u16,
    message: &'a str,
    data: Option<&'a T>,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let code = self.status_code().as_u16();
        let envelope = match self {
            ApiResponse::Success { message, data, .. } => Envelope {
                status: "success",
                code,
                message,
                data: Some(data),
            },
            ApiResponse::Failure { message, .. } => Envelope {
                status: "error",
                code,
                message,
                data: None,
            },
        };
        envelope.serialize(serializer)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
