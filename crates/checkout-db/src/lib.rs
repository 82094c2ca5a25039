//! # checkout-db: Database Layer for the Checkout Service
//!
//! This crate provides the inventory and order stores. It uses SQLite with
//! sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Data Flow                               │
//! │                                                                         │
//! │  CheckoutPipeline (checkout-service)                                   │
//! │       │  InventoryStore / OrderStore / CheckoutStore traits            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   checkout-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ inventory.rs  │    │  (embedded)  │  │   │
//! │  │   │ SqlitePool    │◄───│ order.rs      │    │ 001_init.sql │  │   │
//! │  │   │ write gate    │    └───────────────┘    └──────────────┘  │   │
//! │  │   └───────┬───────┘                                            │   │
//! │  │           │ begin_purchase()                                   │   │
//! │  │           ▼                                                    │   │
//! │  │   ┌───────────────┐                                            │   │
//! │  │   │  PurchaseTx   │  (tx.rs) one atomic purchase               │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (data/checkout.db) or :memory:                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`store`] - Store traits the rest of the workspace programs against
//! - [`tx`] - The purchase transaction
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQL per table
//! - [`seed`] - Demo inventory
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_db::{Database, DbConfig, InventoryStore};
//!
//! let db = Database::new(DbConfig::new("data/checkout.db")).await?;
//! let tv = db.get_item_by_sku("120P90").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod store;
pub mod tx;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{CheckoutStore, HealthCheck, InventoryStore, OrderStore, PurchaseUnit};
pub use tx::PurchaseTx;

pub use repository::inventory::InventoryRepository;
pub use repository::order::OrderRepository;
