//! # API Error Handling
//!
//! Every failed request is answered with a JSON body:
//!
//! ```json
//! { "code": "INSUFFICIENT_STOCK", "message": "Insufficient stock for 120P90 ..." }
//! ```
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────────┬───────────────────────┬────────┐
//! │ Source                   │ ErrorCode             │ Status │
//! ├──────────────────────────┼───────────────────────┼────────┤
//! │ ValidationError          │ VALIDATION_ERROR      │ 400    │
//! │ bad JSON body            │ VALIDATION_ERROR      │ 400    │
//! │ CoreError::AmountOverflow│ VALIDATION_ERROR      │ 400    │
//! │ missing/wrong password   │ UNAUTHORIZED          │ 401    │
//! │ CoreError::ItemNotFound  │ NOT_FOUND             │ 404    │
//! │ OutOfStock/Insufficient  │ INSUFFICIENT_STOCK    │ 404    │
//! │ store / promotion failure│ DEPENDENCY_FAILED     │ 500    │
//! │ failing health probe     │ SERVICE_UNAVAILABLE   │ 503    │
//! └──────────────────────────┴───────────────────────┴────────┘
//! ```
//!
//! Store failures are logged in full and reported with a generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use checkout_core::CoreError;
use checkout_service::{CheckoutError, ErrorKind};

/// Error payload returned by every handler.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Unauthorized,
    NotFound,
    InsufficientStock,
    DependencyFailed,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound | ErrorCode::InsufficientStock => StatusCode::NOT_FOUND,
            ErrorCode::DependencyFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::validation(err.to_string()),
            ErrorKind::Unavailable => {
                let code = match &err {
                    CheckoutError::Core(CoreError::ItemNotFound(_)) => ErrorCode::NotFound,
                    _ => ErrorCode::InsufficientStock,
                };
                ApiError::new(code, err.to_string())
            }
            ErrorKind::Dependency => {
                tracing::error!(error = %err, "Checkout dependency failed");
                let message = match &err {
                    CheckoutError::Promotion { rule, .. } => {
                        format!("Promotion '{}' could not be evaluated", rule)
                    }
                    CheckoutError::Aborted(_) => "Purchase aborted".to_string(),
                    _ => "Inventory store operation failed".to_string(),
                };
                ApiError::new(ErrorCode::DependencyFailed, message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::ValidationError;
    use checkout_db::DbError;

    #[test]
    fn test_checkout_error_mapping() {
        let cases: Vec<(CheckoutError, ErrorCode)> = vec![
            (
                ValidationError::Required {
                    field: "skus".into(),
                }
                .into(),
                ErrorCode::ValidationError,
            ),
            (
                CoreError::ItemNotFound("ZZZ999".into()).into(),
                ErrorCode::NotFound,
            ),
            (
                CoreError::OutOfStock {
                    sku: "120P90".into(),
                }
                .into(),
                ErrorCode::InsufficientStock,
            ),
            (
                CoreError::AmountOverflow("gross total".into()).into(),
                ErrorCode::ValidationError,
            ),
            (
                DbError::QueryFailed("disk I/O error".into()).into(),
                ErrorCode::DependencyFailed,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).code, expected);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InsufficientStock.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::DependencyFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::ServiceUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_details_are_not_exposed() {
        let err: CheckoutError = DbError::QueryFailed("no such table: inventory".into()).into();
        let api = ApiError::from(err);
        assert!(!api.message.contains("inventory"));

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "DEPENDENCY_FAILED");
    }
}
