//! # Store Contracts
//!
//! The traits the checkout pipeline and promotions engine program against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Contracts                                 │
//! │                                                                         │
//! │  InventoryStore          OrderStore             HealthCheck             │
//! │  ├── get_item_by_sku     ├── add_order          └── ping                │
//! │  ├── get_item_by_name    └── list_orders                                │
//! │  ├── get_items_by_sku                                                   │
//! │  ├── list_items                                                         │
//! │  └── upsert_items                                                       │
//! │                                                                         │
//! │  CheckoutStore = InventoryStore + OrderStore + HealthCheck              │
//! │  └── begin_purchase() ──► PurchaseUnit (same reads/writes, atomic)      │
//! │                             └── commit()                                │
//! │                                                                         │
//! │  Implemented by:  Database (pool)   PurchaseTx (one transaction)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads and writes move whole rows: callers read an [`Item`], modify it in
//! memory and write it back through `upsert_items`.

use async_trait::async_trait;
use checkout_core::{Item, Order};

use crate::error::DbResult;

/// Item records keyed by SKU.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Reads one item by SKU.
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>>;

    /// Reads one item by display name.
    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>>;

    /// Reads every row whose SKU appears in `skus`.
    ///
    /// Repeated SKUs in the input produce a single row; missing SKUs are
    /// simply absent from the result. Row order is unspecified.
    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>>;

    /// Lists the whole inventory ordered by name.
    async fn list_items(&self) -> DbResult<Vec<Item>>;

    /// Inserts or replaces whole rows keyed by SKU. Last write wins.
    async fn upsert_items(&self, items: &[Item]) -> DbResult<()>;
}

/// Immutable purchase records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Appends one order.
    async fn add_order(&self, order: &Order) -> DbResult<()>;

    /// Lists every order, newest first.
    async fn list_orders(&self) -> DbResult<Vec<Order>>;
}

/// Liveness probe for a backing store.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> DbResult<()>;
}

/// A single purchase's view of the stores.
///
/// Every read sees the purchase's own uncommitted writes, and no other
/// writer can interleave until the unit is committed or dropped. Dropping
/// without calling [`PurchaseUnit::commit`] discards all writes.
#[async_trait]
pub trait PurchaseUnit: InventoryStore + OrderStore + 'static {
    /// Makes every write of this unit visible at once.
    async fn commit(self) -> DbResult<()>;
}

/// A store able to run the full checkout flow.
#[async_trait]
pub trait CheckoutStore: InventoryStore + OrderStore + HealthCheck + 'static {
    type Purchase: PurchaseUnit;

    /// Opens a purchase unit, waiting for any in-flight purchase to finish.
    async fn begin_purchase(&self) -> DbResult<Self::Purchase>;
}
