//! Demo inventory used by the `seed` binary and by tests across the workspace.

use checkout_core::{Item, Money};

use crate::error::DbResult;
use crate::store::InventoryStore;

/// SKU of the item granted free with every MacBook Pro.
pub const RASPBERRY_PI_SKU: &str = "234234";

/// The four demo items.
///
/// | Name           | SKU    | Price    | Qty |
/// |----------------|--------|----------|-----|
/// | Google TV      | 120P90 | $49.99   | 10  |
/// | MacBook Pro    | 43N23P | $5399.99 | 5   |
/// | Alexa Speaker  | A304SD | $109.50  | 10  |
/// | Raspberry Pi B | 234234 | $30.00   | 2   |
pub fn demo_inventory() -> Vec<Item> {
    vec![
        Item::new("120P90", "Google TV", Money::from_cents(4999), 10),
        Item::new("43N23P", "MacBook Pro", Money::from_cents(539999), 5),
        Item::new("A304SD", "Alexa Speaker", Money::from_cents(10950), 10),
        Item::new(RASPBERRY_PI_SKU, "Raspberry Pi B", Money::from_cents(3000), 2),
    ]
}

/// Upserts the demo inventory into `store`, returning the number of rows.
pub async fn seed_demo_inventory<S: InventoryStore + ?Sized>(store: &S) -> DbResult<usize> {
    let items = demo_inventory();
    store.upsert_items(&items).await?;
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(seed_demo_inventory(&db).await.unwrap(), 4);
        assert_eq!(seed_demo_inventory(&db).await.unwrap(), 4);
        assert_eq!(db.inventory().count().await.unwrap(), 4);

        let pi = db.get_item_by_sku(RASPBERRY_PI_SKU).await.unwrap().unwrap();
        assert_eq!(pi.name, "Raspberry Pi B");
        assert_eq!(pi.inventory_quantity, 2);
    }
}
