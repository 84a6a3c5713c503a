//! Type definitions for the SQLite implementation.
//!
//! This module contains the public identifier type and the internal row type
//! used to map query results.

use socks_core::models::ItemRecord;

mod ids;
pub use ids::ItemId;

#[derive(sqlx::FromRow)]
pub(crate) struct ItemRow {
    pub id: ItemId,
    pub color: String,
    pub cotton_percentage: f64,
    pub quantity: u32,
}

impl From<ItemRow> for ItemRecord<ItemId> {
    fn from(row: ItemRow) -> Self {
        ItemRecord {
            id: row.id,
            color: row.color,
            cotton_percentage: row.cotton_percentage,
            quantity: row.quantity,
        }
    }
}
