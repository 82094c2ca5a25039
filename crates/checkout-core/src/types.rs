//! # Domain Types
//!
//! Core domain types used throughout the checkout service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │      Item       │   │      Order      │   │  PromotionOutcome   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  sku (6 chars)  │   │  reference      │   │  deduction_cents    │   │
//! │  │  name (unique)  │   │  skus (JSON)    │   │  added_items        │   │
//! │  │  price_cents    │   │  price_cents    │   └─────────────────────┘   │
//! │  │  inventory_qty  │   │  created_at     │                              │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────────┐   │
//! │                                               │     PriceQuote      │   │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  ─────────────────  │   │
//! │  │  DiscountRate   │   │ PurchaseReceipt │   │  items              │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  total_gross_cents  │   │
//! │  │  bps (u32)      │   │  order_reference│   │  promotions         │   │
//! │  │  1000 = 10%     │   │  cost_cents     │   │  total_with_discount│   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Item` and `Order` are persisted; `PromotionOutcome`, `PriceQuote` and
//! `PurchaseReceipt` only live for the duration of one request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Item
// =============================================================================

/// A priced, stocked inventory item.
///
/// This is the one representation of an item inside the pipeline. Storage
/// rows and HTTP payloads are translated to and from it at the edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stock Keeping Unit, 6 alphanumeric characters.
    pub sku: String,

    /// Display name, unique across the inventory.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units on hand.
    #[serde(default)]
    pub inventory_quantity: i64,
}

impl Item {
    /// Creates a new item.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        inventory_quantity: i64,
    ) -> Self {
        Item {
            sku: sku.into(),
            name: name.into(),
            price_cents: price.cents(),
            inventory_quantity,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.inventory_quantity >= quantity
    }

    /// Returns a zero-priced copy of this item, as granted by a promotion.
    pub fn as_bonus(&self) -> Item {
        Item {
            price_cents: 0,
            ..self.clone()
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable purchase record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Random, globally unique reference (UUID v4).
    pub reference: String,

    /// Fulfilled SKUs in order: requested items first, then bonus items.
    pub skus: Vec<String>,

    /// Final charged price in cents.
    pub price_cents: i64,

    /// When the order was recorded.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order with a freshly generated reference.
    pub fn new(skus: Vec<String>, price: Money) -> Self {
        Order {
            reference: generate_order_reference(),
            skus,
            price_cents: price.cents(),
            created_at: Utc::now(),
        }
    }

    /// Returns the charged price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Generates an opaque order reference.
pub fn generate_order_reference() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Promotion Outcome
// =============================================================================

/// The combined effect of promotion rules on one candidate item list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionOutcome {
    /// Amount taken off the gross total, in cents.
    pub deduction_cents: i64,

    /// Free items granted, in rule registration order.
    pub added_items: Vec<Item>,
}

impl PromotionOutcome {
    /// An outcome with no deduction and no bonus items.
    pub fn none() -> Self {
        PromotionOutcome::default()
    }

    /// An outcome that only deducts.
    pub fn deduction(amount: Money) -> Self {
        PromotionOutcome {
            deduction_cents: amount.cents(),
            added_items: Vec::new(),
        }
    }

    /// An outcome that only grants bonus items.
    pub fn bonus(items: Vec<Item>) -> Self {
        PromotionOutcome {
            deduction_cents: 0,
            added_items: items,
        }
    }

    /// Returns the deduction as Money.
    #[inline]
    pub fn deduction_amount(&self) -> Money {
        Money::from_cents(self.deduction_cents)
    }

    /// Checks if nothing was deducted or granted.
    pub fn is_empty(&self) -> bool {
        self.deduction_cents == 0 && self.added_items.is_empty()
    }

    /// Folds another outcome into this one.
    ///
    /// Deductions saturate: anything at or above the gross total already
    /// floors the price at zero.
    pub fn absorb(&mut self, other: PromotionOutcome) {
        self.deduction_cents = self.deduction_cents.saturating_add(other.deduction_cents);
        self.added_items.extend(other.added_items);
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// A non-mutating price computation for a candidate item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Resolved items, one entry per requested SKU (repeats included).
    pub items: Vec<Item>,

    /// Promotion detail (deduction and bonus items).
    pub promotions: PromotionOutcome,

    /// Sum of unit prices, in cents.
    pub total_gross_cents: i64,

    /// Gross total minus the deduction, in cents.
    pub total_with_discount_cents: i64,
}

impl PriceQuote {
    /// Returns the gross total as Money.
    #[inline]
    pub fn total_gross(&self) -> Money {
        Money::from_cents(self.total_gross_cents)
    }

    /// Returns the net total as Money.
    #[inline]
    pub fn total_with_discount(&self) -> Money {
        Money::from_cents(self.total_with_discount_cents)
    }
}

// =============================================================================
// Purchase Receipt
// =============================================================================

/// Result of a committed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub order_reference: String,
    pub cost_cents: i64,
}

impl PurchaseReceipt {
    /// Returns the charged amount as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate() {
        assert_eq!(DiscountRate::from_percent(10).bps(), 1000);
        assert_eq!(DiscountRate::from_bps(825).bps(), 825);
    }

    #[test]
    fn test_item_supply_check() {
        let item = Item::new("120P90", "Google TV", Money::from_cents(4999), 2);
        assert!(item.can_supply(2));
        assert!(!item.can_supply(3));
        assert_eq!(item.price().cents(), 4999);
    }

    #[test]
    fn test_bonus_copy_is_free() {
        let item = Item::new("234234", "Raspberry Pi B", Money::from_cents(3000), 2);
        let bonus = item.as_bonus();
        assert_eq!(bonus.price_cents, 0);
        assert_eq!(bonus.sku, "234234");
        assert_eq!(bonus.inventory_quantity, 2);
    }

    #[test]
    fn test_order_references_are_unique() {
        let a = Order::new(vec!["120P90".into()], Money::from_cents(4999));
        let b = Order::new(vec!["120P90".into()], Money::from_cents(4999));
        assert_ne!(a.reference, b.reference);
        assert!(Uuid::parse_str(&a.reference).is_ok());
    }

    #[test]
    fn test_promotion_outcome_absorb() {
        let mut total = PromotionOutcome::none();
        assert!(total.is_empty());

        total.absorb(PromotionOutcome::deduction(Money::from_cents(4999)));
        let pi = Item::new("234234", "Raspberry Pi B", Money::zero(), 0);
        total.absorb(PromotionOutcome::bonus(vec![pi.clone()]));

        assert_eq!(total.deduction_amount().cents(), 4999);
        assert_eq!(total.added_items, vec![pi]);
    }

    #[test]
    fn test_absorb_saturates() {
        let mut total = PromotionOutcome::deduction(Money::from_cents(i64::MAX - 1));
        total.absorb(PromotionOutcome::deduction(Money::from_cents(10)));
        assert_eq!(total.deduction_amount().cents(), i64::MAX);
    }

    #[test]
    fn test_wire_shapes() {
        let item = Item::new("120P90", "Google TV", Money::from_cents(4999), 10);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "sku": "120P90",
                "name": "Google TV",
                "price_cents": 4999,
                "inventory_quantity": 10
            })
        );

        let order = Order::new(vec!["120P90".to_string()], Money::from_cents(4999));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["reference"], order.reference.as_str());
        assert_eq!(json["skus"], serde_json::json!(["120P90"]));
        assert!(json["created_at"].is_string());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_item_quantity_defaults_when_absent() {
        let item: Item =
            serde_json::from_str(r#"{"sku":"120P90","name":"Google TV","price_cents":4999}"#)
                .unwrap();
        assert_eq!(item.inventory_quantity, 0);
    }
}
