#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod socks_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, extract::DefaultBodyLimit};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use socks_core::ports::{Application, Repository};
use std::{fmt::Display, sync::Arc};
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config.
///
/// Also returns the generated OpenAPI document, which is served under
/// `/docs/api.json`.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, OpenApi) {
    let mut api = OpenApi::default();
    let upload_limit = config.upload_limit;
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/api/socks", socks_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api.clone()))) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config)))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            ItemId: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                ItemId: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            >,
        >
{
}
