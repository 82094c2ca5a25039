//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  checkout-api startup                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐   ┌──────────────────┐    │
//! │  │            SqlitePool                    │   │   write gate     │    │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │   │  Mutex<()>       │    │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │   │  one writer at   │    │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │   │  a time          │    │
//! │  └─────────────────────────────────────────┘   └──────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote / list requests  ──► any free connection (parallel)             │
//! │  purchase / bulk upsert ──► gate, then one transaction                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so readers never block
//! the single writer and the writer never blocks readers.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::inventory::{self, InventoryRepository};
use crate::repository::order::{self, OrderRepository};
use crate::store::{CheckoutStore, HealthCheck, InventoryStore, OrderStore};
use crate::tx::PurchaseTx;
use checkout_core::{Item, Order};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("data/checkout.db")
///     .max_connections(5)
///     .busy_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps connections
    /// open forever, which an in-memory database requires.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Maximum lifetime of a connection. `None` for in-memory databases.
    /// Default: 30 minutes
    pub max_lifetime: Option<Duration>,

    /// How long SQLite retries a locked database before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Drop every table before migrating. All stored data is lost.
    /// Default: false
    pub recreate_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
            recreate_schema: false,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether to drop the existing schema on connect.
    pub fn recreate_schema(mut self, recreate: bool) -> Self {
        self.recreate_schema = recreate;
        self
    }

    /// Creates an in-memory database configuration.
    ///
    /// Each SQLite connection to `:memory:` sees its own database, so the
    /// pool is pinned to one connection that is never reaped.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: None,
            max_lifetime: None,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
            recreate_schema: false,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access and the store traits.
///
/// Cloning is cheap: the pool and the write gate are shared.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("data/checkout.db")).await?;
///
/// let items = db.inventory().list().await?;
/// let mut purchase = db.begin_purchase().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Serializes purchases and bulk upserts.
    write_gate: Arc<Mutex<()>>,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - busy timeout so a locked file is retried, not failed
    /// 3. Creates the connection pool
    /// 4. Drops the existing schema (if `recreate_schema` is set)
    /// 5. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            write_gate: Arc::new(Mutex::new(())),
        };

        if config.recreate_schema {
            migrations::drop_schema(&db.pool).await?;
        }

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Idempotent. Called by `new()` when `run_migrations` is set.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the inventory repository.
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone(), self.write_gate.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Opens a purchase transaction.
    ///
    /// Waits for the write gate first, so at most one purchase is between
    /// its first read and its commit at any time.
    pub async fn begin_purchase(&self) -> DbResult<PurchaseTx> {
        let gate = self.write_gate.clone().lock_owned().await;
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Purchase transaction opened");
        Ok(PurchaseTx::new(tx, gate))
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        self.ping().await.is_ok()
    }
}

// =============================================================================
// Store Trait Implementations
// =============================================================================

#[async_trait]
impl InventoryStore for Database {
    async fn get_item_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        inventory::fetch_by_sku(&self.pool, sku).await
    }

    async fn get_item_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        inventory::fetch_by_name(&self.pool, name).await
    }

    async fn get_items_by_sku(&self, skus: &[String]) -> DbResult<Vec<Item>> {
        inventory::fetch_by_skus(&self.pool, skus).await
    }

    async fn list_items(&self) -> DbResult<Vec<Item>> {
        inventory::fetch_all(&self.pool).await
    }

    async fn upsert_items(&self, items: &[Item]) -> DbResult<()> {
        self.inventory().upsert(items).await
    }
}

#[async_trait]
impl OrderStore for Database {
    async fn add_order(&self, order: &Order) -> DbResult<()> {
        order::insert(&self.pool, order).await
    }

    async fn list_orders(&self) -> DbResult<Vec<Order>> {
        order::fetch_all(&self.pool).await
    }
}

#[async_trait]
impl HealthCheck for Database {
    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CheckoutStore for Database {
    type Purchase = PurchaseTx;

    async fn begin_purchase(&self) -> DbResult<PurchaseTx> {
        Database::begin_purchase(self).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
