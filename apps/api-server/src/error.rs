//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the API Server                         │
//! │                                                                         │
//! │  StoreError::NotFound ─────────────► 404 {"message": "..."}            │
//! │  StoreError::Validation ───────────► 400 {"message": "..."}            │
//! │  SaleError::InsufficientStock ─────► 409 {"message": "..."}            │
//! │  SaleError::MedicineNotFound ──────► 404 {"message": "..."}            │
//! │  Anything store-internal ──────────► 500 {"message": generic}          │
//! │                                                                         │
//! │  Internal failures are logged with full detail; the client only        │
//! │  sees a generic message.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pharma_sales::SaleError;
use pharma_store::StoreError;

/// API error returned from HTTP handlers.
///
/// Serializes as the `{message}` body the original surface used, paired
/// with an HTTP status code.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    /// Creates a 404 error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 500 error with a generic client-facing message.
    pub fn internal() -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found("Medicine not found"),
            StoreError::Validation(e) => ApiError::bad_request(e.to_string()),
            StoreError::InsufficientStock { .. } => {
                ApiError::new(StatusCode::CONFLICT, err.to_string())
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Store operation failed: {}", other);
                ApiError::internal()
            }
        }
    }
}

/// Converts sale errors to API errors.
impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        match &err {
            SaleError::EmptyRequest | SaleError::InvalidQuantity { .. } => {
                ApiError::bad_request(err.to_string())
            }
            SaleError::MedicineNotFound { .. } => ApiError::not_found(err.to_string()),
            SaleError::InsufficientStock { .. } => {
                ApiError::new(StatusCode::CONFLICT, err.to_string())
            }
            SaleError::StoreWrite { source, .. } => {
                tracing::error!("Sale write failed: {}", source);
                ApiError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::error::ValidationError;

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::not_found("Medicine", "x").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Medicine not found");

        let err: ApiError = StoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "name is required");

        let err: ApiError = StoreError::QueryFailed("boom".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_sale_error_mapping() {
        let err: ApiError = SaleError::InsufficientStock {
            medicine_id: "x".to_string(),
            available: 0,
            requested: 1,
            applied: Vec::new(),
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: ApiError = SaleError::EmptyRequest.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
