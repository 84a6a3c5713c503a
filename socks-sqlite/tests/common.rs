#![allow(dead_code)]

use socks_core::models::ItemData;
use socks_sqlite::{Db, config::SqliteConfig};

/// A fresh, private in-memory database.
pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn socks(color: &str, cotton_percentage: f64, quantity: u32) -> ItemData {
    ItemData {
        color: color.to_owned(),
        cotton_percentage,
        quantity,
    }
}
