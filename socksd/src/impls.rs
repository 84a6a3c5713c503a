//! The concrete application wired into the server.

use socks_core::ports::Application;
use socks_sqlite::Db;

/// The inventory application, backed by SQLite.
#[derive(Clone)]
pub struct SocksApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Application for SocksApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }
}
