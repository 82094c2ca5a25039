//! # Purchase Transaction
//!
//! One purchase's exclusive, atomic view of the inventory and order tables.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  db.begin_purchase()                                                   │
//! │       │  1. wait for write gate (other purchases queue here)           │
//! │       │  2. BEGIN                                                      │
//! │       ▼                                                                 │
//! │  PurchaseTx                                                            │
//! │       │  get_items_by_sku / get_item_by_sku   (reads see own writes)   │
//! │       │  add_order / upsert_items             (uncommitted)            │
//! │       ▼                                                                 │
//! │  commit() ──► COMMIT, gate released                                    │
//! │  drop     ──► ROLLBACK, gate released                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{inventory, order};
use crate::store::{InventoryStore, OrderStore, PurchaseUnit};
use checkout_core::{Item, Order};

/// An open purchase transaction holding the store's write gate.
///
/// Field order matters: the transaction is dropped (rolled back) before
/// the gate is released.
pub struct PurchaseTx {
    tx: Mutex<Transaction<'static, Sqlite>>,
    _gate: OwnedMutexGuard<()>,
}

impl std::fmt::Debug for PurchaseTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseTx").finish_non_exhaustive()
    }
}

impl PurchaseTx {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>, gate: OwnedMutexGuard<()>) -> Self {
        PurchaseTx {
            tx: Mutex::new(tx),
            _gate: gate,
        }
    }

    /// Explicitly discards every write of this purchase.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .into_inner()
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Purchase transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PurchaseTx {
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        let mut tx = self.tx.lock().await;
        inventory::fetch_by_sku(&mut **tx, sku).await
    }

    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        let mut tx = self.tx.lock().await;
        inventory::fetch_by_name(&mut **tx, name).await
    }

    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        let mut tx = self.tx.lock().await;
        inventory::fetch_by_skus(&mut **tx, skus).await
    }

    async fn list_items(&self) -> DbResult<Vec<Item>> {
        let mut tx = self.tx.lock().await;
        inventory::fetch_all(&mut **tx).await
    }

    async fn upsert_items(&self, items: &[Item]) -> DbResult<()> {
        let mut tx = self.tx.lock().await;
        inventory::upsert_rows(&mut **tx, items).await
    }
}

#[async_trait]
impl OrderStore for PurchaseTx {
    async fn add_order(&self, order: &Order) -> DbResult<()> {
        let mut tx = self.tx.lock().await;
        order::insert(&mut **tx, order).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        let mut tx = self.tx.lock().await;
        order::fetch_all(&mut **tx).await
    }
}

#[async_trait]
impl PurchaseUnit for PurchaseTx {
    async fn commit(self) -> DbResult<()> {
        self.tx
            .into_inner()
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Purchase transaction committed");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use checkout_core::Money;
    use std::time::Duration;

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory()
            .upsert(&[Item::new("120P90", "Google TV", Money::from_cents(4999), 10)])
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let db = seeded().await;

        let tx = db.begin_purchase().await.unwrap();
        let mut tv = tx.get_item_by_sku("120P90").await.unwrap().unwrap();
        tv.inventory_quantity -= 1;
        tx.upsert_items(&[tv]).await.unwrap();
        tx.add_order(&Order::new(vec!["120P90".into()], Money::from_cents(4999)))
            .await
            .unwrap();

        // reads inside the transaction see its own writes
        assert_eq!(tx.list_orders().await.unwrap().len(), 1);
        tx.commit().await.unwrap();

        let tv = db.get_item_by_sku("120P90").await.unwrap().unwrap();
        assert_eq!(tv.inventory_quantity, 9);
        assert_eq!(db.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = seeded().await;

        {
            let tx = db.begin_purchase().await.unwrap();
            let mut tv = tx.get_item_by_sku("120P90").await.unwrap().unwrap();
            tv.inventory_quantity = 0;
            tx.upsert_items(&[tv]).await.unwrap();
            tx.add_order(&Order::new(vec!["120P90".into()], Money::from_cents(4999)))
                .await
                .unwrap();
        }

        let tv = db.get_item_by_sku("120P90").await.unwrap().unwrap();
        assert_eq!(tv.inventory_quantity, 10);
        assert!(db.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = seeded().await;

        let tx = db.begin_purchase().await.unwrap();
        tx.add_order(&Order::new(vec!["120P90".into()], Money::from_cents(4999)))
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert!(db.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_purchase_waits_for_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("gate.db")))
            .await
            .unwrap();

        let first = db.begin_purchase().await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_millis(100), db.begin_purchase()).await;
        assert!(blocked.is_err(), "second purchase must wait for the gate");

        first.commit().await.unwrap();

        let second = tokio::time::timeout(Duration::from_secs(5), db.begin_purchase()).await;
        assert!(second.is_ok());
    }
}
