//! Classbook
//!
//! Main application entry point

use anyhow::Context;
use tracing::{info, warn};

use classbook::{
    config::Settings,
    utils::logging,
    database::{self, DatabaseService, PoolConfig},
    state::AppState,
    handlers::create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", classbook::info());
    info!(settings = ?settings, "Configuration loaded");

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = database::create_pool(&PoolConfig::from(&settings.database))
        .await
        .context("Failed to open the database")?;

    // Run database migrations
    info!("Running database migrations...");
    database::run_migrations(&db_pool).await?;

    let addr = settings.bind_addr()?;
    let state = AppState::new(DatabaseService::new(db_pool.clone()), settings)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    info!("Classbook has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Ctrl-C received, shutting down");
}
