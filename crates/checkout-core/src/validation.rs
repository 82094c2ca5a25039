//! # Validation Module
//!
//! Input validation for SKU lists and inventory ingestion.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout pipeline                                            │
//! │  └── THIS MODULE: SKU format, item fields (before any store access)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (sku), UNIQUE (name)                                       │
//! │  └── CHECK (price_cents >= 0), CHECK (inventory_quantity >= 0)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{is_sku, validate_sku_list};
//!
//! assert!(is_sku("120P90"));
//! assert!(validate_sku_list(&["120P90".to_string()]).is_ok());
//! assert!(validate_sku_list(&[]).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Item;
use crate::{MAX_INVENTORY_QUANTITY, MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS, SKU_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// SKU Validators
// =============================================================================

/// Checks whether `s` is a well-formed SKU.
///
/// ## Rules
/// - Exactly [`SKU_LENGTH`] characters
/// - ASCII letters and digits only (no spaces, no punctuation)
///
/// ## Example
/// ```rust
/// use checkout_core::validation::is_sku;
///
/// assert!(is_sku("43N23P"));
/// assert!(!is_sku("43N23"));
/// assert!(!is_sku("43N 3P"));
/// ```
pub fn is_sku(s: &str) -> bool {
    s.len() == SKU_LENGTH && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validates one SKU, naming it by `field` in the error.
pub fn validate_sku(field: &str, sku: &str) -> ValidationResult<()> {
    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !is_sku(sku) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be {} alphanumeric characters", SKU_LENGTH),
        });
    }

    Ok(())
}

/// Validates a requested SKU list.
///
/// ## Rules
/// - Must not be empty
/// - Every entry must pass [`is_sku`]; the first bad entry is reported
///   as `skus[i]`
/// - Repeats are allowed (each repeat is another unit)
pub fn validate_sku_list(skus: &[String]) -> ValidationResult<()> {
    if skus.is_empty() {
        return Err(ValidationError::Required {
            field: "skus".to_string(),
        });
    }

    for (index, sku) in skus.iter().enumerate() {
        validate_sku(&format!("skus[{}]", index), sku)?;
    }

    Ok(())
}

// =============================================================================
// Item Validators
// =============================================================================

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_ITEM_NAME_LEN`] characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed, up to [`MAX_PRICE_CENTS`].
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(4999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-1).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price_cents".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "price_cents".to_string(),
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates an ingested stock quantity.
///
/// Ingestion must bring in at least one unit and at most
/// [`MAX_INVENTORY_QUANTITY`].
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::TooSmall {
            field: "inventory_quantity".to_string(),
            min: 1,
        });
    }

    if qty > MAX_INVENTORY_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "inventory_quantity".to_string(),
            max: MAX_INVENTORY_QUANTITY,
        });
    }

    Ok(())
}

/// Validates one item submitted for ingestion.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_sku("sku", &item.sku)?;
    validate_price_cents(item.price_cents)?;
    validate_quantity(item.inventory_quantity)?;
    Ok(())
}

/// Validates an ingestion batch.
///
/// ## Rules
/// - Must not be empty
/// - Every item must pass [`validate_item`]
/// - No SKU and no name may appear twice within the batch
pub fn validate_item_batch(items: &[Item]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    let mut skus = HashSet::with_capacity(items.len());
    let mut names = HashSet::with_capacity(items.len());

    for item in items {
        validate_item(item)?;

        if !skus.insert(item.sku.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: item.sku.clone(),
            });
        }
        if !names.insert(item.name.trim()) {
            return Err(ValidationError::Duplicate {
                field: "name".to_string(),
                value: item.name.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(sku: &str, name: &str, price: i64, qty: i64) -> Item {
        Item::new(sku, name, Money::from_cents(price), qty)
    }

    #[test]
    fn test_is_sku() {
        assert!(is_sku("120P90"));
        assert!(is_sku("234234"));
        assert!(is_sku("abcdef"));

        assert!(!is_sku(""));
        assert!(!is_sku("12345"));
        assert!(!is_sku("1234567"));
        assert!(!is_sku("12 456"));
        assert!(!is_sku("12-456"));
        // six chars but multi-byte
        assert!(!is_sku("12345é"));
    }

    #[test]
    fn test_validate_sku_list_reports_index() {
        let skus = vec!["120P90".to_string(), "bad".to_string()];
        match validate_sku_list(&skus) {
            Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "skus[1]"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_sku_list_rejects_empty() {
        assert!(matches!(
            validate_sku_list(&[]),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_sku_list_allows_repeats() {
        let skus = vec!["120P90".to_string(); 3];
        assert!(validate_sku_list(&skus).is_ok());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Google TV").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(MAX_ITEM_NAME_LEN)).is_ok());
        assert!(validate_item_name(&"A".repeat(MAX_ITEM_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_item() {
        assert!(validate_item(&item("120P90", "Google TV", 4999, 10)).is_ok());
        assert!(validate_item(&item("120P90", "Free Sticker", 0, 1)).is_ok());

        assert!(validate_item(&item("120P9", "Google TV", 4999, 10)).is_err());
        assert!(validate_item(&item("120P90", "", 4999, 10)).is_err());
        assert!(validate_item(&item("120P90", "Google TV", -1, 10)).is_err());
        assert!(matches!(
            validate_item(&item("120P90", "Google TV", 4999, 0)),
            Err(ValidationError::TooSmall { min: 1, .. })
        ));
    }

    #[test]
    fn test_validate_item_upper_bounds() {
        assert!(validate_item(&item("BIG001", "Yacht", MAX_PRICE_CENTS, 1)).is_ok());
        assert!(matches!(
            validate_item(&item("BIG001", "Yacht", MAX_PRICE_CENTS + 1, 1)),
            Err(ValidationError::TooLarge { ref field, .. }) if field == "price_cents"
        ));
        assert!(matches!(
            validate_item(&item("BIG001", "Yacht", i64::MAX / 2 + 1, 1)),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            validate_item(&item("BIG001", "Yacht", 100, MAX_INVENTORY_QUANTITY + 1)),
            Err(ValidationError::TooLarge { ref field, .. }) if field == "inventory_quantity"
        ));
    }

    #[test]
    fn test_validate_item_batch_rejects_duplicates() {
        let batch = vec![
            item("120P90", "Google TV", 4999, 10),
            item("120P90", "Google TV 2", 4999, 10),
        ];
        assert!(matches!(
            validate_item_batch(&batch),
            Err(ValidationError::Duplicate { .. })
        ));

        let batch = vec![
            item("120P90", "Google TV", 4999, 10),
            item("120P91", "Google TV", 4999, 10),
        ];
        assert!(matches!(
            validate_item_batch(&batch),
            Err(ValidationError::Duplicate { .. })
        ));

        assert!(validate_item_batch(&[]).is_err());
    }
}
