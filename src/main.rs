use std::net::SocketAddr;
use tracing::info;

use event_calendar::{app, config::Config, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config.app);

    info!("Starting event calendar API ({})", config.app.environment);

    // Connect and migrate before accepting requests
    let state = AppState::new(config.clone())
        .await
        .map_err(|e| anyhow::anyhow!("failed to open event store: {e}"))?;

    let store = state.store.clone();

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.database().pool.close().await;
    info!("Database connection closed");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
