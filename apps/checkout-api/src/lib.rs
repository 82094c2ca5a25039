//! # Checkout API
//!
//! HTTP front end for the checkout pipeline.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Checkout API Server                            │
//! │                                                                         │
//! │  client ──► axum Router ──► log_requests ──► [require_password] ──►     │
//! │                                                   handlers              │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                    CheckoutPipeline<Database>           │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                                   SQLite                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Write routes (item ingestion, purchase) require the `X-Auth-Password`
//! header to equal `CHECKOUT_PASSWORD`. Request counts and latencies are
//! exposed for Prometheus on `GET /metrics`.

pub mod build_info;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;

pub use cli::{Cli, Command, RunArgs};
pub use config::{ApiConfig, ConfigError, LogFormat};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use routes::{inventory, orders, probe};

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let auth = from_fn_with_state(state.clone(), middleware::require_password);

    Router::new()
        .route("/status", get(probe::status))
        .route("/health", get(probe::health))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/v0/inventory/items",
            get(inventory::list_items).merge(post(inventory::add_items).route_layer(auth.clone())),
        )
        .route(
            "/v0/inventory/items/purchase",
            post(inventory::purchase).route_layer(auth),
        )
        .route("/v0/inventory/price", post(inventory::price_list))
        .route("/v0/inventory/price/{key}", get(inventory::price_one))
        .route("/v0/orders", get(orders::list_orders))
        .layer(from_fn(middleware::log_requests))
        .with_state(state)
}
