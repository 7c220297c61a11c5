//! ShipDesk API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shipdesk_common::config::AppConfig;
use shipdesk_common::db::{create_pool, run_migrations};

use shipdesk_api::routes::create_router;
use shipdesk_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "shipdesk_api=debug,shipdesk_engine=debug,shipdesk_notifier=debug,tower_http=debug",
            )
        }))
        .init();

    tracing::info!("Starting ShipDesk API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    if let Err(reason) = config.telegram.validate() {
        tracing::warn!(%reason, "Telegram notifications disabled until credentials are set");
    }

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;

    let port = config.api_port;

    // Build application state
    let state = AppState::new(pool, config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
