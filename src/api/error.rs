//! HTTP error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::types::MessageResponse;
use crate::Error;

/// An error rendered as `{"message": ...}` with a status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Missing required fields. Clients of this API expect 401 here.
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a failed operation to a response.
    ///
    /// Validation errors keep their message. Anything else is logged and reported
    /// as 500 with `fallback`, or with the error text when `expose` is set.
    pub fn from_error(err: Error, fallback: &str, expose: bool) -> Self {
        match err {
            Error::Validation(message) => Self::bad_request(message),
            err => {
                tracing::error!(error = %err, "{}", fallback);
                if expose {
                    Self::internal(err.to_string())
                } else {
                    Self::internal(fallback)
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}
