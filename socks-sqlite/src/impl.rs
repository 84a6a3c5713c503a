//! Repository trait implementations for the SQLite database.

use crate::{Db, types::ItemId};
use socks_core::ports::Repository;

mod inventory;

impl Repository for Db {
    type Error = sqlx::Error;
    type ItemId = ItemId;
}
