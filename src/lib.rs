pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod datetime;
pub mod error;
pub mod models;
pub mod store;
pub mod view;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LogFormat};

// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub store: store::EventStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let store = store::EventStore::open(&config.database.url, config.database.pool_size).await?;
        Ok(Arc::new(Self { store, config }))
    }
}

/// The full HTTP application: event and category routes, health check,
/// open CORS and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::new(&config.rust_log);
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
