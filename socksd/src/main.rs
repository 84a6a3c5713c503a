use std::fs::File;

use socks_axum::{router, start_server};
use socks_sqlite::Db;
use socksd::{AppConfig, Cli, impls::SocksApp};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Events are written to stdout, filtered by RUST_LOG.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = SocksApp { db };

    if let Some(path) = cli.schema {
        let schema = router(app, server).1;
        serde_json::to_writer_pretty(File::create(&path)?, &schema)?;
        tracing::info!("Wrote OpenAPI document to {}", path.display());
        return Ok(());
    }

    start_server(server, app).await?;
    Ok(())
}
