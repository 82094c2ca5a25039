//! # Inventory Repository
//!
//! Database operations for inventory rows.
//!
//! The query functions are generic over the executor so the same SQL serves
//! the pool (plain reads) and an open purchase transaction.
//!
//! ## Batch Lookup
//! ```text
//! requested: ["120P90", "43N23P", "120P90"]
//!      │
//!      ▼  dedupe
//! SELECT ... FROM inventory WHERE sku IN (?, ?)
//!      │
//!      ▼
//! rows: [Google TV, MacBook Pro]   (one per distinct SKU found)
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DbResult;
use checkout_core::Item;

const SELECT_COLUMNS: &str =
    "SELECT id, sku, name, price_cents, inventory_quantity, updated_at FROM inventory";

/// Storage form of an inventory row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price_cents: i64,
    pub inventory_quantity: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for Item {
    fn from(row: InventoryRow) -> Self {
        Item {
            sku: row.sku,
            name: row.name,
            price_cents: row.price_cents,
            inventory_quantity: row.inventory_quantity,
        }
    }
}

// =============================================================================
// Query Functions
// =============================================================================

pub(crate) async fn fetch_by_sku<'e, E>(executor: E, sku: &str) -> DbResult<Option<Item>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, InventoryRow>(&format!("{} WHERE sku = ?1", SELECT_COLUMNS))
        .bind(sku)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Item::from))
}

pub(crate) async fn fetch_by_name<'e, E>(executor: E, name: &str) -> DbResult<Option<Item>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, InventoryRow>(&format!("{} WHERE name = ?1", SELECT_COLUMNS))
        .bind(name)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Item::from))
}

pub(crate) async fn fetch_by_skus<'e, E>(executor: E, skus: &[String]) -> DbResult<Vec<Item>>
where
    E: SqliteExecutor<'e>,
{
    let distinct: BTreeSet<&str> = skus.iter().map(String::as_str).collect();
    if distinct.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
    builder.push(" WHERE sku IN (");
    let mut separated = builder.separated(", ");
    for sku in &distinct {
        separated.push_bind(*sku);
    }
    separated.push_unseparated(")");

    let rows = builder
        .build_query_as::<InventoryRow>()
        .fetch_all(executor)
        .await?;

    debug!(requested = distinct.len(), found = rows.len(), "Batch inventory lookup");
    Ok(rows.into_iter().map(Item::from).collect())
}

pub(crate) async fn fetch_all<'e, E>(executor: E) -> DbResult<Vec<Item>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, InventoryRow>(&format!("{} ORDER BY name", SELECT_COLUMNS))
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(Item::from).collect())
}

/// Writes whole rows keyed by SKU on one connection.
pub(crate) async fn upsert_rows(conn: &mut SqliteConnection, items: &[Item]) -> DbResult<()> {
    let now = Utc::now();

    for item in items {
        sqlx::query(
            r#"
            INSERT INTO inventory (sku, name, price_cents, inventory_quantity, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(sku) DO UPDATE SET
                name = excluded.name,
                price_cents = excluded.price_cents,
                inventory_quantity = excluded.inventory_quantity,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.inventory_quantity)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    debug!(count = items.len(), "Upserted inventory rows");
    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for inventory database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.inventory();
///
/// let tv = repo.get_by_sku("120P90").await?;
/// repo.upsert(&[restocked_tv]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository sharing the database's write gate.
    pub fn new(pool: SqlitePool, write_gate: Arc<Mutex<()>>) -> Self {
        InventoryRepository { pool, write_gate }
    }

    /// Gets an item by SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        fetch_by_sku(&self.pool, sku).await
    }

    /// Gets an item by display name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        fetch_by_name(&self.pool, name).await
    }

    /// Gets all rows for the given SKUs.
    pub async fn get_many(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        fetch_by_skus(&self.pool, skus).await
    }

    /// Lists every item ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        fetch_all(&self.pool).await
    }

    /// Upserts a batch of items atomically.
    ///
    /// Takes the write gate so a bulk load never interleaves with a purchase.
    pub async fn upsert(&self, items: &[Item]) -> DbResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let _gate = self.write_gate.lock().await;
        let mut tx = self.pool.begin().await?;
        upsert_rows(&mut tx, items).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Counts inventory rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Tests
// =============================================================================
