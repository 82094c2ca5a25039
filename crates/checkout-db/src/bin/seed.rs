//! # Seed Data Loader
//!
//! Loads the demo inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p checkout-db --bin seed
//!
//! # Specify database path
//! cargo run -p checkout-db --bin seed -- --db ./data/checkout.db
//! ```
//!
//! Re-running is safe: rows are upserted by SKU, so stock is reset to the
//! demo quantities.

use std::env;
use std::path::Path;

use checkout_db::seed::seed_demo_inventory;
use checkout_db::{Database, DbConfig, InventoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("data/checkout.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Checkout Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: data/checkout.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Checkout Seed Data Loader");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let count = seed_demo_inventory(&db).await?;
    println!("✓ Upserted {} items", count);
    println!();

    for item in db.list_items().await? {
        println!(
            "  {:<16} {}  {:>10}  qty {}",
            item.name,
            item.sku,
            item.price().to_string(),
            item.inventory_quantity
        );
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
