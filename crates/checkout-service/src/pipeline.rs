//! # Checkout Pipeline
//!
//! Quote and purchase flows over the store traits.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase(["43N23P", "120P90"])                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. validate SKU formats ───────────────────► Validation (400)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. begin_purchase()  (write gate + BEGIN)                             │
//! │  3. batch fetch rows                                                   │
//! │  4. cumulative count per SKU ≤ stock? ─────► InsufficientStock (404)   │
//! │  5. decrement in memory, sum gross                                     │
//! │  6. promotions (bonus stock read through the same transaction)         │
//! │  7. re-check each bonus against live stock; drop silently if short     │
//! │  8. final = max(gross − deduction, 0)                                  │
//! │       │                                                                 │
//! │       ▼  ── spawned, runs to completion even if the caller goes away ──│
//! │  9. add_order, upsert rows, COMMIT                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PurchaseReceipt { order_reference, cost_cents }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure before step 9 drops the transaction, which rolls back and
//! releases the write gate.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use checkout_core::validation::{is_sku, validate_item_batch, validate_sku_list};
use checkout_core::{
    CoreError, Item, Money, Order, PriceQuote, PurchaseReceipt, ValidationError,
};
use checkout_db::{CheckoutStore, DbError, InventoryStore, OrderStore, PurchaseUnit};

use crate::error::{CheckoutError, CheckoutResult};
use crate::promotions::PromotionsEngine;

/// The checkout pipeline: one store, one promotions engine.
///
/// Cloning shares both.
#[derive(Debug)]
pub struct CheckoutPipeline<S> {
    store: Arc<S>,
    promotions: Arc<PromotionsEngine>,
}

impl<S> Clone for CheckoutPipeline<S> {
    fn clone(&self) -> Self {
        CheckoutPipeline {
            store: Arc::clone(&self.store),
            promotions: Arc::clone(&self.promotions),
        }
    }
}

impl<S: CheckoutStore> CheckoutPipeline<S> {
    pub fn new(store: Arc<S>, promotions: PromotionsEngine) -> Self {
        CheckoutPipeline {
            store,
            promotions: Arc::new(promotions),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn promotions(&self) -> &PromotionsEngine {
        &self.promotions
    }

    // =========================================================================
    // Quote
    // =========================================================================

    /// Prices a SKU list without writing anything.
    ///
    /// Repeated SKUs price as repeated units. Stock is only checked for
    /// being non-zero; the cumulative check happens at purchase time.
    #[instrument(skip(self), fields(count = skus.len()))]
    pub async fn quote(&self, skus: &[String]) -> CheckoutResult<PriceQuote> {
        validate_sku_list(skus)?;

        let rows = index_by_sku(self.store.get_items_by_sku(skus).await?);

        let mut items = Vec::with_capacity(skus.len());
        for sku in skus {
            let item = rows
                .get(sku)
                .ok_or_else(|| CoreError::ItemNotFound(sku.clone()))?;
            ensure_in_stock(item)?;
            items.push(item.clone());
        }

        self.price(items).await
    }

    /// Prices a single unit looked up by SKU, or by name when `key` is not
    /// SKU-shaped.
    #[instrument(skip(self))]
    pub async fn quote_by_key(&self, key: &str) -> CheckoutResult<PriceQuote> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ValidationError::Required {
                field: "key".to_string(),
            }
            .into());
        }

        let found = if is_sku(key) {
            self.store.get_item_by_sku(key).await?
        } else {
            self.store.get_item_by_name(key).await?
        };

        let item = found.ok_or_else(|| CoreError::ItemNotFound(key.to_string()))?;
        ensure_in_stock(&item)?;

        self.price(vec![item]).await
    }

    async fn price(&self, items: Vec<Item>) -> CheckoutResult<PriceQuote> {
        let gross = gross_total(&items)?;
        let promotions = self
            .promotions
            .apply_promotions(&items, self.store.as_ref())
            .await?;
        let net = gross.less_floored(promotions.deduction_amount());

        debug!(
            gross_cents = gross.cents(),
            net_cents = net.cents(),
            bonus_items = promotions.added_items.len(),
            "Quote computed"
        );

        Ok(PriceQuote {
            items,
            promotions,
            total_gross_cents: gross.cents(),
            total_with_discount_cents: net.cents(),
        })
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Buys the listed SKUs, decrementing stock and recording an order.
    #[instrument(skip(self), fields(count = skus.len()))]
    pub async fn purchase(&self, skus: &[String]) -> CheckoutResult<PurchaseReceipt> {
        validate_sku_list(skus)?;

        let tx = self.store.begin_purchase().await?;

        let mut rows = index_by_sku(tx.get_items_by_sku(skus).await?);

        // Cumulative stock check, before any write.
        let mut consumed: HashMap<String, i64> = HashMap::new();
        let mut resolved = Vec::with_capacity(skus.len());
        for (index, sku) in skus.iter().enumerate() {
            let row = rows
                .get(sku)
                .ok_or_else(|| CoreError::ItemNotFound(sku.clone()))?;

            let requested = consumed.entry(sku.clone()).or_insert(0);
            *requested += 1;
            if *requested > row.inventory_quantity {
                debug!(sku = %sku, index, "Insufficient stock");
                return Err(CoreError::InsufficientStock {
                    sku: sku.clone(),
                    index,
                    available: row.inventory_quantity,
                    requested: *requested,
                }
                .into());
            }
            resolved.push(row.clone());
        }

        for (sku, count) in &consumed {
            if let Some(row) = rows.get_mut(sku) {
                row.inventory_quantity -= count;
            }
        }
        let gross = gross_total(&resolved)?;

        let promotions = self.promotions.apply_promotions(&resolved, &tx).await?;

        let mut fulfilled: Vec<String> = skus.to_vec();
        for bonus in &promotions.added_items {
            let Some(live) = tx.get_item_by_sku(&bonus.sku).await? else {
                debug!(sku = %bonus.sku, "Bonus item vanished, skipping");
                continue;
            };

            let already = consumed.get(&bonus.sku).copied().unwrap_or(0);
            if live.inventory_quantity < already + 1 {
                debug!(
                    sku = %bonus.sku,
                    available = live.inventory_quantity,
                    consumed = already,
                    "Bonus stock exhausted, skipping"
                );
                continue;
            }

            *consumed.entry(bonus.sku.clone()).or_insert(0) += 1;
            rows.entry(bonus.sku.clone()).or_insert(live).inventory_quantity -= 1;
            fulfilled.push(bonus.sku.clone());
        }

        let cost = gross.less_floored(promotions.deduction_amount());
        let order = Order::new(fulfilled, cost);
        let touched: Vec<Item> = rows
            .into_values()
            .filter(|row| consumed.contains_key(&row.sku))
            .collect();

        let receipt = PurchaseReceipt {
            order_reference: order.reference.clone(),
            cost_cents: cost.cents(),
        };
        let units = order.skus.len();

        // Once the order append is issued the unit runs to completion on its
        // own task, whatever happens to the caller.
        tokio::spawn(async move {
            tx.add_order(&order).await?;
            tx.upsert_items(&touched).await?;
            tx.commit().await?;
            Ok::<_, DbError>(())
        })
        .await
        .map_err(|e| CheckoutError::Aborted(e.to_string()))??;

        info!(
            reference = %receipt.order_reference,
            units,
            price_cents = receipt.cost_cents,
            "Purchase committed"
        );

        Ok(receipt)
    }

    // =========================================================================
    // Inventory and orders
    // =========================================================================

    /// Lists the whole inventory.
    pub async fn list_items(&self) -> CheckoutResult<Vec<Item>> {
        Ok(self.store.list_items().await?)
    }

    /// Validates and bulk-upserts items, returning how many were written.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn add_items(&self, items: &[Item]) -> CheckoutResult<usize> {
        validate_item_batch(items)?;

        let items: Vec<Item> = items
            .iter()
            .map(|item| Item {
                name: item.name.trim().to_string(),
                ..item.clone()
            })
            .collect();

        self.store.upsert_items(&items).await.map_err(|err| match err {
            // a name already owned by another SKU
            DbError::UniqueViolation { field, .. } => {
                CheckoutError::from(ValidationError::AlreadyInUse { field })
            }
            other => other.into(),
        })?;

        info!(count = items.len(), "Inventory upserted");
        Ok(items.len())
    }

    /// Lists every order, newest first.
    pub async fn list_orders(&self) -> CheckoutResult<Vec<Order>> {
        Ok(self.store.list_orders().await?)
    }

    /// Probes the backing store.
    pub async fn ping(&self) -> CheckoutResult<()> {
        Ok(self.store.ping().await?)
    }
}

fn index_by_sku(rows: Vec<Item>) -> HashMap<String, Item> {
    rows.into_iter().map(|row| (row.sku.clone(), row)).collect()
}

fn gross_total(items: &[Item]) -> Result<Money, CoreError> {
    Money::checked_sum(items.iter().map(Item::price))
        .ok_or_else(|| CoreError::AmountOverflow("gross total".to_string()))
}

fn ensure_in_stock(item: &Item) -> Result<(), CoreError> {
    if item.inventory_quantity < 1 {
        return Err(CoreError::OutOfStock {
            sku: item.sku.clone(),
        });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
