//! # Order Repository
//!
//! Append-only storage for purchase records.
//!
//! The SKU list is stored as a JSON array in a single TEXT column. Orders
//! are listed by autoincrement id, descending, which is creation order even
//! when two orders share a timestamp.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use checkout_core::Order;

/// Storage form of an order row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub reference: String,
    pub sku_list: String,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = crate::error::DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            reference: row.reference,
            skus: serde_json::from_str(&row.sku_list)?,
            price_cents: row.price_cents,
            created_at: row.created_at,
        })
    }
}

pub(crate) async fn insert<'e, E>(executor: E, order: &Order) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    let sku_list = serde_json::to_string(&order.skus)?;

    sqlx::query(
        r#"
        INSERT INTO orders (reference, sku_list, price_cents, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&order.reference)
    .bind(sku_list)
    .bind(order.price_cents)
    .bind(order.created_at)
    .execute(executor)
    .await?;

    debug!(reference = %order.reference, "Order inserted");
    Ok(())
}

pub(crate) async fn fetch_all<'e, E>(executor: E) -> DbResult<Vec<Order>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT id, reference, sku_list, price_cents, created_at
        FROM orders
        ORDER BY id DESC
        "#,
    )
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(Order::try_from).collect()
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Appends an order outside of any purchase.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        insert(&self.pool, order).await
    }

    /// Lists every order, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        fetch_all(&self.pool).await
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use checkout_core::{Money, Order};

    #[tokio::test]
    async fn test_orders_list_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let first = Order::new(vec!["120P90".into()], Money::from_cents(4999));
        let second = Order::new(
            vec!["43N23P".into(), "234234".into()],
            Money::from_cents(539999),
        );
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let orders = repo.list().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].reference, second.reference);
        assert_eq!(orders[0].skus, vec!["43N23P", "234234"]);
        assert_eq!(orders[1].reference, first.reference);
        assert_eq!(orders[1].price_cents, 4999);
    }

    #[tokio::test]
    async fn test_duplicate_reference_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let order = Order::new(vec!["120P90".into()], Money::from_cents(4999));
        repo.insert(&order).await.unwrap();

        let err = repo.insert(&order).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
