//! Promotion rules and the engine that chains them.

pub mod engine;
pub mod rules;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::PromotionsEngine;
pub use rules::PromotionRule;
