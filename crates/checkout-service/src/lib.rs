//! # checkout-service: Promotions and the Checkout Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       checkout-service                                  │
//! │                                                                         │
//! │   ┌───────────────────────┐        ┌──────────────────────────────┐    │
//! │   │   CheckoutPipeline    │───────►│      PromotionsEngine        │    │
//! │   │   quote / purchase    │        │  BundledBonus                │    │
//! │   │   add_items / orders  │        │  VolumeDiscount              │    │
//! │   └───────────┬───────────┘        │  ThresholdPercentage         │    │
//! │               │                    └──────────────┬───────────────┘    │
//! │               │ CheckoutStore                     │ InventoryStore     │
//! │               ▼                                   ▼ (bonus stock)      │
//! │   ┌─────────────────────────────────────────────────────────────────┐  │
//! │   │             checkout-db (Database / PurchaseTx)                 │  │
//! │   └─────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is built explicitly and handed to the pipeline:
//!
//! ```rust,ignore
//! let pipeline = CheckoutPipeline::new(Arc::new(db), PromotionsEngine::with_default_rules());
//! let receipt = pipeline.purchase(&["120P90".into(), "43N23P".into()]).await?;
//! ```

pub mod error;
pub mod pipeline;
pub mod promotions;

pub use error::{CheckoutError, CheckoutResult, ErrorKind};
pub use pipeline::CheckoutPipeline;
pub use promotions::{PromotionRule, PromotionsEngine};
