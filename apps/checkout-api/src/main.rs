//! # Checkout API Server
//!
//! ```text
//! parse CLI ─► load config ─► apply flags ─► init tracing ─► open SQLite
//!      (recreate?, migrate) ─► build pipeline ─► serve HTTP
//!      ─► Ctrl+C / SIGTERM ─► drain ─► close pool
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use checkout_api::build_info;
use checkout_api::logging::init_tracing;
use checkout_api::{app, ApiConfig, AppState, Cli, Command, RunArgs};
use checkout_db::Database;
use checkout_service::{CheckoutPipeline, PromotionsEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Version => {
            print!("{}", build_info::version_report());
            Ok(())
        }
        Command::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = args.apply(ApiConfig::load().context("Failed to load configuration")?);
    init_tracing(&config.log_level, config.log_format);

    info!(
        version = build_info::VERSION,
        commit = build_info::GIT_COMMIT,
        port = config.port,
        sqlite = %config.sqlite_path.display(),
        memory_db = config.memory_db,
        "Starting checkout API..."
    );
    if build_info::is_dirty() {
        warn!("Running a DIRTY build (uncommitted changes present); do not run in production");
    }
    if config.recreate_schema {
        warn!("Recreating the database schema; stored inventory and orders are discarded");
    }

    if !config.memory_db {
        if let Some(parent) = config.sqlite_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
    }

    let db = Arc::new(
        Database::new(config.db_config())
            .await
            .context("Failed to open database")?,
    );
    info!("Database ready");

    let promotions = PromotionsEngine::with_default_rules();
    info!(rules = promotions.rules().len(), "Promotions loaded");

    if config.password.is_empty() {
        warn!("CHECKOUT_PASSWORD is empty; write routes are unprotected");
    }

    let pipeline = CheckoutPipeline::new(db.clone(), promotions);
    let state = AppState::new(pipeline, config.password.as_str());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
