//! Product Store - REST inventory service

use axum_helpers::server::{close_postgres, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::{check_health, connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        "Connecting to PostgreSQL"
    );

    let retry = RetryConfig::new()
        .with_max_retries(5)
        .with_initial_delay(500);
    let db = connect_from_config_with_retry(config.database.clone(), Some(retry)).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }
    check_health(&db).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state)).await?;

    info!(port = state.config.server.port, "Starting Product Store");

    let db = state.db.clone();
    create_production_app(router, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        close_postgres(db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Product Store shutdown complete");
    Ok(())
}
