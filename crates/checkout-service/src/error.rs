//! # Checkout Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutError                         kind()                           │
//! │  ├── Core(Validation/AmountOverflow)──► Validation  (client input)      │
//! │  ├── Core(ItemNotFound/OutOfStock/                                      │
//! │  │        InsufficientStock)       ──► Unavailable  (inventory)         │
//! │  ├── Store(DbError)                ──► Dependency   (internal)          │
//! │  ├── Promotion { rule, source }    ──► Dependency                       │
//! │  └── Aborted(..)                   ──► Dependency                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::{CoreError, ValidationError};
use checkout_db::DbError;
use thiserror::Error;

/// Pipeline failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Domain error: bad input or unavailable inventory.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store read or write failed. Nothing was committed.
    #[error("Store error: {0}")]
    Store(#[from] DbError),

    /// A promotion rule's inventory read failed.
    #[error("Promotion '{rule}' failed: {source}")]
    Promotion {
        rule: &'static str,
        #[source]
        source: DbError,
    },

    /// The commit phase was interrupted (task panic or runtime shutdown).
    #[error("Purchase aborted: {0}")]
    Aborted(String),
}

/// Coarse classification used by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unavailable,
    Dependency,
}

impl CheckoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckoutError::Core(CoreError::Validation(_) | CoreError::AmountOverflow(_)) => {
                ErrorKind::Validation
            }
            CheckoutError::Core(_) => ErrorKind::Unavailable,
            CheckoutError::Store(_)
            | CheckoutError::Promotion { .. }
            | CheckoutError::Aborted(_) => ErrorKind::Dependency,
        }
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::Core(CoreError::Validation(err))
    }
}

/// Result type for pipeline operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err: CheckoutError = ValidationError::Required {
            field: "skus".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: CheckoutError = CoreError::ItemNotFound("120P90".into()).into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);

        let err: CheckoutError = CoreError::AmountOverflow("gross total".into()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: CheckoutError = DbError::PoolExhausted.into();
        assert_eq!(err.kind(), ErrorKind::Dependency);

        let err = CheckoutError::Promotion {
            rule: "bundled_bonus",
            source: DbError::PoolExhausted,
        };
        assert_eq!(err.kind(), ErrorKind::Dependency);
        assert_eq!(
            err.to_string(),
            "Promotion 'bundled_bonus' failed: Connection pool exhausted"
        );
    }

    #[test]
    fn test_core_messages_pass_through() {
        let err: CheckoutError = CoreError::OutOfStock {
            sku: "234234".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Item 234234 is out of stock");
    }
}
