//! Application configuration management.
//!
//! Configuration is merged from default values, an optional file and
//! environment variables, in increasing order of precedence.

use crate::Cli;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, upload limit)
    #[serde(default)]
    pub server: socks_axum::config::AxumConfig,

    /// Database configuration (file location, busy timeout)
    #[serde(default)]
    pub database: socks_sqlite::config::SqliteConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_PATH="/data/socks.db"
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
            config = config.add_source(config::File::from(path.as_path()));
        }

        // APP_SERVER__BIND_ADDRESS maps to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(config.build()?.try_deserialize()?)
    }
}
