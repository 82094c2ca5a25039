//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Not-found / out-of-stock conditions            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  checkout-service errors                                               │
//! │  └── CheckoutError    - Pipeline failures (wraps both of the above)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError → JSON   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, request index)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Every variant except [`CoreError::Validation`] is a resource-unavailable
/// condition: the request was well formed, but the inventory cannot satisfy it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No inventory row exists for the requested SKU or name.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but has no units on hand.
    ///
    /// ## When This Occurs
    /// - Quoting an item whose quantity-on-hand is zero
    #[error("Item {sku} is out of stock")]
    OutOfStock { sku: String },

    /// Cumulative requested count exceeds the quantity on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Purchase ["120P90", "120P90", "120P90"]   (stock: 2)
    ///      │
    ///      ▼
    /// index 0 → count 1 ≤ 2 ✓
    /// index 1 → count 2 ≤ 2 ✓
    /// index 2 → count 3 > 2 ✗
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "120P90", index: 2, available: 2, requested: 3 }
    /// ```
    #[error(
        "Insufficient stock for {sku} at request index {index}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        sku: String,
        index: usize,
        available: i64,
        requested: i64,
    },

    /// A price total does not fit in the money representation.
    #[error("{0} exceeds the largest representable amount")]
    AmountOverflow(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for input faults (as opposed to unavailable inventory).
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::AmountOverflow(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Numeric value is above the allowed maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value within a single request.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Value is already used by another stored record.
    #[error("{field} is already used by another item")]
    AlreadyInUse { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "120P90".to_string(),
            index: 2,
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 120P90 at request index 2: available 2, requested 3"
        );

        let err = CoreError::OutOfStock {
            sku: "43N23P".to_string(),
        };
        assert_eq!(err.to_string(), "Item 43N23P is out of stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "skus".to_string(),
        };
        assert_eq!(err.to_string(), "skus is required");

        let err = ValidationError::InvalidFormat {
            field: "skus[1]".to_string(),
            reason: "must be 6 alphanumeric characters".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "skus[1] has invalid format: must be 6 alphanumeric characters"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "skus".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(core_err.is_validation());
        assert!(!CoreError::ItemNotFound("ABC123".into()).is_validation());
        assert!(CoreError::AmountOverflow("gross total".into()).is_validation());
    }
}
