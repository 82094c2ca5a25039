//! # Promotion Rules
//!
//! The closed set of promotion variants.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                 Trigger count n       Effect                      │
//! │  ───────────────────  ────────────────────  ─────────────────────────── │
//! │  BundledBonus         n / per grants        grants × free bonus item,   │
//! │                                             only if stock ≥ grants      │
//! │  VolumeDiscount       n / group_size        groups × unit price off     │
//! │  ThresholdPercentage  n > threshold         rate × (unit price × n) off │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules count triggers by item name, never mutate their input, and only
//! touch a store to read the bonus item's stock.

use serde::{Deserialize, Serialize};
use tracing::debug;

use checkout_core::{DiscountRate, Item, Money, PromotionOutcome};
use checkout_db::{DbError, InventoryStore};

/// A single promotion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionRule {
    /// One free `bonus_sku` for every `per` units of `trigger_name`.
    BundledBonus {
        trigger_name: String,
        per: u32,
        bonus_sku: String,
    },

    /// Buy `group_size`, pay for one less.
    VolumeDiscount {
        trigger_name: String,
        group_size: u32,
    },

    /// `discount` off the trigger line when more than `threshold` units are bought.
    ThresholdPercentage {
        trigger_name: String,
        threshold: u32,
        discount: DiscountRate,
    },
}

/// Count and a representative item for one trigger name.
struct Tally<'a> {
    count: i64,
    item: Option<&'a Item>,
}

fn tally<'a>(items: &'a [Item], name: &str) -> Tally<'a> {
    let mut matching = items.iter().filter(|item| item.name == name);
    let item = matching.next();
    let count = item.map_or(0, |_| 1 + matching.count() as i64);
    Tally { count, item }
}

/// `count` units of `item`, saturating at the largest amount.
///
/// The pipeline rejects a gross total that overflows before any rule runs,
/// and every line is bounded by that total.
fn line_total(item: &Item, count: i64) -> Money {
    item.price()
        .multiply_quantity(count)
        .unwrap_or(Money::from_cents(i64::MAX))
}

impl PromotionRule {
    /// Stable identifier used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            PromotionRule::BundledBonus { .. } => "bundled_bonus",
            PromotionRule::VolumeDiscount { .. } => "volume_discount",
            PromotionRule::ThresholdPercentage { .. } => "threshold_percentage",
        }
    }

    /// Name of the item this rule counts.
    pub fn trigger_name(&self) -> &str {
        match self {
            PromotionRule::BundledBonus { trigger_name, .. }
            | PromotionRule::VolumeDiscount { trigger_name, .. }
            | PromotionRule::ThresholdPercentage { trigger_name, .. } => trigger_name,
        }
    }

    /// Evaluates this rule against a candidate item list.
    ///
    /// Only [`PromotionRule::BundledBonus`] reads `store`; a failed read is
    /// the only way this returns an error.
    pub async fn apply<S>(&self, items: &[Item], store: &S) -> Result<PromotionOutcome, DbError>
    where
        S: InventoryStore + ?Sized,
    {
        let Tally { count, item } = tally(items, self.trigger_name());
        let Some(item) = item else {
            return Ok(PromotionOutcome::none());
        };

        let outcome = match self {
            PromotionRule::BundledBonus { per, bonus_sku, .. } => {
                if *per == 0 {
                    return Ok(PromotionOutcome::none());
                }
                let grants = count / i64::from(*per);
                if grants == 0 {
                    return Ok(PromotionOutcome::none());
                }

                match store.get_item_by_sku(bonus_sku).await? {
                    Some(bonus) if bonus.can_supply(grants) => {
                        let free = bonus.as_bonus();
                        PromotionOutcome::bonus(vec![free; grants as usize])
                    }
                    Some(bonus) => {
                        debug!(
                            sku = %bonus_sku,
                            available = bonus.inventory_quantity,
                            grants,
                            "Bonus stock short, granting none"
                        );
                        PromotionOutcome::none()
                    }
                    None => {
                        debug!(sku = %bonus_sku, "Bonus item not stocked");
                        PromotionOutcome::none()
                    }
                }
            }

            PromotionRule::VolumeDiscount { group_size, .. } => {
                if *group_size == 0 {
                    return Ok(PromotionOutcome::none());
                }
                let groups = count / i64::from(*group_size);
                PromotionOutcome::deduction(line_total(item, groups))
            }

            PromotionRule::ThresholdPercentage {
                threshold,
                discount,
                ..
            } => {
                if count <= i64::from(*threshold) {
                    return Ok(PromotionOutcome::none());
                }
                PromotionOutcome::deduction(line_total(item, count).percentage_of(*discount))
            }
        };

        Ok(outcome)
    }
}
