//! # Repository Module
//!
//! SQL for each table, behind a small repository type per table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  db.inventory().get_by_sku("120P90")      ┐                             │
//! │  PurchaseTx::get_item_by_sku("120P90")    ┘──► inventory::fetch_by_sku  │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                            SQLite (pool or tx)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InventoryRepository`](inventory::InventoryRepository) - item rows
//! - [`OrderRepository`](order::OrderRepository) - purchase records

pub mod inventory;
pub mod order;
