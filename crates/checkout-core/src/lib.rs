//! # checkout-core: Pure Domain Logic for the Checkout Service
//!
//! This crate holds the domain model shared by every other crate in the
//! workspace. It contains no I/O: no database, no network, no clock reads
//! outside of constructing timestamps.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-api (axum)                          │   │
//! │  │    /v0/inventory/price ──► /v0/inventory/items/purchase        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            checkout-service (promotions + pipeline)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │   Item    │  │   Money   │  │  is_sku   │                  │   │
//! │  │   │   Order   │  │  bps math │  │  items    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 checkout-db (Database Layer)                    │   │
//! │  │            SQLite stores, migrations, purchase transaction      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Order, PriceQuote, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - SKU and item validation
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::money::Money;
//! use checkout_core::types::DiscountRate;
//!
//! let price = Money::from_cents(10950); // $109.50
//!
//! // 10% off, computed in basis points
//! let discount = price.percentage_of(DiscountRate::from_bps(1000));
//! assert_eq!(discount.cents(), 1095);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Exact length of a SKU.
///
/// SKUs are fixed-format codes: ASCII letters and digits only, no spaces.
pub const SKU_LENGTH: usize = 6;

/// Maximum length of an item display name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Largest accepted unit price, in cents ($1,000,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Largest accepted stock quantity for one item.
pub const MAX_INVENTORY_QUANTITY: i64 = 1_000_000_000;
