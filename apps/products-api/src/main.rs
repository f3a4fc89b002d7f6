//! Products API - REST server over a PostgreSQL product catalogue

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());

    // Retries only cover startup; request-time failures surface as defaults
    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        Some(RetryConfig::new()),
    )
    .await?;

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.environment);

    // /health: liveness with app name/version
    // /ready: SELECT 1 against the pool
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        "Starting Products API on {} (30s shutdown timeout)",
        state.config.server.address()
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
