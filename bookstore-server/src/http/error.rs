//! API error types with IntoResponse
//!
//! Every failure renders as `{"message": "..."}`. Store failures are
//! logged with their operation and id; the body only carries a generic
//! per-operation message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::{BookError, Operation};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not an integer (400)
    InvalidId,

    /// Body is missing or does not decode as a book payload (400)
    MalformedBody,

    /// Body decoded but failed field rules (400)
    Validation(ValidationError),

    /// No book with that id (404)
    NotFound { id: i64 },

    /// Store failure (500, logged)
    Store {
        operation: Operation,
        id: Option<i64>,
        source: sqlx::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::MalformedBody | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidId => "invalid book ID".to_owned(),
            Self::MalformedBody => "invalid request".to_owned(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound { .. } => "book not found".to_owned(),
            Self::Store { operation, .. } => operation.failure_message().to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store {
            operation,
            id,
            source,
        } = &self
        {
            // Log the actual error, return generic message
            tracing::error!(
                operation = operation.as_str(),
                id = ?id,
                error = %source,
                "Store failure"
            );
        }

        let status = self.status();
        let body = json!({ "message": self.message() });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<BookError> for ApiError {
    fn from(e: BookError) -> Self {
        match e {
            BookError::NotFound { id } => Self::NotFound { id },
            BookError::Invalid(e) => Self::Validation(e),
            BookError::Store {
                operation,
                id,
                source,
            } => Self::Store {
                operation,
                id,
                source,
            },
        }
    }
}
