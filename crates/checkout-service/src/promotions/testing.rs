//! Test stores: an in-memory `InventoryStore` for promotion rules, and a
//! database wrapper whose purchase units misbehave on demand.

use std::collections::HashMap;

use async_trait::async_trait;
use checkout_core::{Item, Money, Order};
use checkout_db::{
    CheckoutStore, Database, DbError, DbResult, HealthCheck, InventoryStore, OrderStore,
    PurchaseTx, PurchaseUnit,
};

#[derive(Debug, Default)]
pub(crate) struct FakeInventory {
    items: HashMap<String, Item>,
    fail: bool,
}

impl FakeInventory {
    pub(crate) fn with_stock(sku: &str, name: &str, price_cents: i64, qty: i64) -> Self {
        let mut store = FakeInventory::default();
        store.items.insert(
            sku.to_string(),
            Item::new(sku, name, Money::from_cents(price_cents), qty),
        );
        store
    }

    /// Every read fails.
    pub(crate) fn failing() -> Self {
        FakeInventory {
            items: HashMap::new(),
            fail: true,
        }
    }

    fn check(&self) -> DbResult<()> {
        if self.fail {
            Err(DbError::ConnectionFailed("fake store offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InventoryStore for FakeInventory {
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        self.check()?;
        Ok(self.items.get(sku).cloned())
    }

    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        self.check()?;
        Ok(self.items.values().find(|i| i.name == name).cloned())
    }

    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        self.check()?;
        Ok(self
            .items
            .values()
            .filter(|i| skus.contains(&i.sku))
            .cloned()
            .collect())
    }

    async fn list_items(&self) -> DbResult<Vec<Item>> {
        self.check()?;
        Ok(self.items.values().cloned().collect())
    }

    async fn upsert_items(&self, _items: &[Item]) -> DbResult<()> {
        Err(DbError::Internal("fake store is read-only".into()))
    }
}

/// How purchase-side reads of the bonus SKU misbehave.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BonusRead {
    Fail,
    Stall,
}

/// A real database whose purchase units misread one SKU.
///
/// Only single-SKU reads inside a purchase are affected, which is exactly
/// the bundled-bonus stock lookup; batch reads and the store itself behave.
pub(crate) struct FlakyBonusStore {
    db: Database,
    sku: String,
    mode: BonusRead,
}

impl FlakyBonusStore {
    pub(crate) fn new(db: Database, sku: &str, mode: BonusRead) -> Self {
        FlakyBonusStore {
            db,
            sku: sku.to_string(),
            mode,
        }
    }

    pub(crate) fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl InventoryStore for FlakyBonusStore {
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        InventoryStore::get_item_by_sku(&self.db, sku).await
    }

    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        InventoryStore::get_item_by_name(&self.db, name).await
    }

    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        InventoryStore::get_items_by_sku(&self.db, skus).await
    }

    async fn list_items(&self) -> DbResult<Vec<Item>> {
        InventoryStore::list_items(&self.db).await
    }

    async fn upsert_items(&self, items: &[Item]) -> DbResult<()> {
        InventoryStore::upsert_items(&self.db, items).await
    }
}

#[async_trait]
impl OrderStore for FlakyBonusStore {
    async fn add_order(&self, order: &Order) -> DbResult<()> {
        OrderStore::add_order(&self.db, order).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        OrderStore::list_orders(&self.db).await
    }
}

#[async_trait]
impl HealthCheck for FlakyBonusStore {
    async fn ping(&self) -> DbResult<()> {
        HealthCheck::ping(&self.db).await
    }
}

#[async_trait]
impl CheckoutStore for FlakyBonusStore {
    type Purchase = FlakyBonusTx;

    async fn begin_purchase(&self) -> DbResult<FlakyBonusTx> {
        Ok(FlakyBonusTx {
            inner: CheckoutStore::begin_purchase(&self.db).await?,
            sku: self.sku.clone(),
            mode: self.mode,
        })
    }
}

pub(crate) struct FlakyBonusTx {
    inner: PurchaseTx,
    sku: String,
    mode: BonusRead,
}

#[async_trait]
impl InventoryStore for FlakyBonusTx {
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        if sku == self.sku {
            match self.mode {
                BonusRead::Fail => {
                    return Err(DbError::QueryFailed("disk I/O error".into()));
                }
                BonusRead::Stall => std::future::pending::<()>().await,
            }
        }
        self.inner.get_item_by_sku(sku).await
    }

    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        self.inner.get_item_by_name(name).await
    }

    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        self.inner.get_items_by_sku(skus).await
    }

    async fn list_items(&self) -> DbResult<Vec<Item>> {
        self.inner.list_items().await
    }

    async fn upsert_items(&self, items: &[Item]) -> DbResult<()> {
        self.inner.upsert_items(items).await
    }
}

#[async_trait]
impl OrderStore for FlakyBonusTx {
    async fn add_order(&self, order: &Order) -> DbResult<()> {
        self.inner.add_order(order).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        self.inner.list_orders().await
    }
}

#[async_trait]
impl PurchaseUnit for FlakyBonusTx {
    async fn commit(self) -> DbResult<()> {
        self.inner.commit().await
    }
}
