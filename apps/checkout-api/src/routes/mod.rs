//! HTTP handlers, grouped by resource.
//!
//! | Method | Path                           | Auth |
//! |--------|--------------------------------|------|
//! | GET    | `/status`                      |      |
//! | GET    | `/health`                      |      |
//! | GET    | `/metrics`                     |      |
//! | GET    | `/v0/inventory/items`          |      |
//! | POST   | `/v0/inventory/items`          | yes  |
//! | GET    | `/v0/inventory/price/{key}`    |      |
//! | POST   | `/v0/inventory/price`          |      |
//! | POST   | `/v0/inventory/items/purchase` | yes  |
//! | GET    | `/v0/orders`                   |      |

pub mod inventory;
pub mod orders;
pub mod probe;

/// Name reported by the probe endpoints.
pub const SERVICE_NAME: &str = "checkout-api";

/// Crate version reported by the probe endpoints.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
