//! # Promotions Engine
//!
//! Runs an ordered list of [`PromotionRule`]s and folds their outcomes.
//!
//! ```text
//! items ──► rule 1 ──┐
//!       ──► rule 2 ──┼──► Σ deductions, bonus items in rule order
//!       ──► rule 3 ──┘
//! ```
//!
//! Rules are independent: each sees the same candidate list, never another
//! rule's bonus items.

use tracing::{debug, warn};

use checkout_core::{DiscountRate, Item, PromotionOutcome};
use checkout_db::seed::RASPBERRY_PI_SKU;
use checkout_db::InventoryStore;

use super::rules::PromotionRule;
use crate::error::{CheckoutError, CheckoutResult};

/// The ordered rule chain.
#[derive(Debug, Clone, Default)]
pub struct PromotionsEngine {
    rules: Vec<PromotionRule>,
}

impl PromotionsEngine {
    /// Creates an engine evaluating `rules` in the given order.
    pub fn new(rules: Vec<PromotionRule>) -> Self {
        PromotionsEngine { rules }
    }

    /// The store's standing promotions.
    ///
    /// | Rule                | Trigger       | Effect                          |
    /// |---------------------|---------------|---------------------------------|
    /// | BundledBonus        | MacBook Pro   | free Raspberry Pi B per unit    |
    /// | VolumeDiscount      | Google TV     | buy 3, pay 2                    |
    /// | ThresholdPercentage | Alexa Speaker | 10% off when more than 3 bought |
    pub fn with_default_rules() -> Self {
        PromotionsEngine::new(vec![
            PromotionRule::BundledBonus {
                trigger_name: "MacBook Pro".to_string(),
                per: 1,
                bonus_sku: RASPBERRY_PI_SKU.to_string(),
            },
            PromotionRule::VolumeDiscount {
                trigger_name: "Google TV".to_string(),
                group_size: 3,
            },
            PromotionRule::ThresholdPercentage {
                trigger_name: "Alexa Speaker".to_string(),
                threshold: 3,
                discount: DiscountRate::from_percent(10),
            },
        ])
    }

    /// Registered rules, in evaluation order.
    pub fn rules(&self) -> &[PromotionRule] {
        &self.rules
    }

    /// Applies every rule to `items`.
    ///
    /// Any rule error aborts the whole evaluation; there is no partial result.
    pub async fn apply_promotions<S>(
        &self,
        items: &[Item],
        store: &S,
    ) -> CheckoutResult<PromotionOutcome>
    where
        S: InventoryStore + ?Sized,
    {
        let mut total = PromotionOutcome::none();
        if items.is_empty() {
            return Ok(total);
        }

        for rule in &self.rules {
            let outcome = rule.apply(items, store).await.map_err(|source| {
                warn!(rule = rule.kind(), error = %source, "Promotion rule failed");
                CheckoutError::Promotion {
                    rule: rule.kind(),
                    source,
                }
            })?;

            if !outcome.is_empty() {
                debug!(
                    rule = rule.kind(),
                    trigger = rule.trigger_name(),
                    deduction_cents = outcome.deduction_cents,
                    bonus_items = outcome.added_items.len(),
                    "Promotion applied"
                );
            }
            total.absorb(outcome);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotions::testing::FakeInventory;
    use checkout_core::Money;

    fn tv() -> Item {
        Item::new("120P90", "Google TV", Money::from_cents(4999), 10)
    }
    fn mac() -> Item {
        Item::new("43N23P", "MacBook Pro", Money::from_cents(539999), 5)
    }
    fn alexa() -> Item {
        Item::new("A304SD", "Alexa Speaker", Money::from_cents(10950), 10)
    }

    fn pi_store(qty: i64) -> FakeInventory {
        FakeInventory::with_stock(RASPBERRY_PI_SKU, "Raspberry Pi B", 3000, qty)
    }

    #[tokio::test]
    async fn test_empty_input() {
        let engine = PromotionsEngine::with_default_rules();
        let outcome = engine
            .apply_promotions(&[], &FakeInventory::failing())
            .await
            .unwrap();
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_rules_combine() {
        let engine = PromotionsEngine::with_default_rules();
        let cart = vec![
            mac(),
            tv(),
            alexa(),
            tv(),
            alexa(),
            tv(),
            alexa(),
            alexa(),
        ];

        let outcome = engine.apply_promotions(&cart, &pi_store(2)).await.unwrap();

        // one Google TV free + 10% of 4 Alexa Speakers
        assert_eq!(outcome.deduction_cents, 4999 + 4380);
        assert_eq!(outcome.added_items.len(), 1);
        assert_eq!(outcome.added_items[0].sku, RASPBERRY_PI_SKU);
    }

    #[tokio::test]
    async fn test_order_independent() {
        let engine = PromotionsEngine::with_default_rules();
        let mut cart = vec![tv(), mac(), tv(), alexa(), tv(), alexa(), alexa(), alexa()];
        let forward = engine.apply_promotions(&cart, &pi_store(5)).await.unwrap();

        cart.reverse();
        let reversed = engine.apply_promotions(&cart, &pi_store(5)).await.unwrap();

        cart.rotate_left(3);
        let rotated = engine.apply_promotions(&cart, &pi_store(5)).await.unwrap();

        assert_eq!(forward, reversed);
        assert_eq!(forward, rotated);
    }

    #[tokio::test]
    async fn test_zero_stock_bonus_leaves_other_rules() {
        let engine = PromotionsEngine::with_default_rules();
        let cart = vec![mac(), tv(), tv(), tv()];

        let outcome = engine.apply_promotions(&cart, &pi_store(0)).await.unwrap();
        assert!(outcome.added_items.is_empty());
        assert_eq!(outcome.deduction_cents, 4999);
    }

    #[tokio::test]
    async fn test_rule_error_aborts() {
        let engine = PromotionsEngine::with_default_rules();
        let cart = vec![mac(), tv(), tv(), tv()];

        let err = engine
            .apply_promotions(&cart, &FakeInventory::failing())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Promotion {
                rule: "bundled_bonus",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_engine() {
        let engine = PromotionsEngine::default();
        let outcome = engine.apply_promotions(&[tv(), tv(), tv()], &pi_store(1)).await.unwrap();
        assert!(outcome.is_empty());
        assert!(engine.rules().is_empty());
    }
}
