use axum_test::TestServer;
use socks_axum::{config::AxumConfig, router};
use socks_core::ports::Application;
use socks_sqlite::{Db, config::SqliteConfig};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}

/// A server over a fresh in-memory database.
pub async fn test_server() -> TestServer {
    let db = Db::open(&SqliteConfig::default()).await.unwrap();
    let (router, _) = router(TestApp(db), AxumConfig::default());
    TestServer::new(router).unwrap()
}
