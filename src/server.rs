//! Process lifecycle: schema setup, serving, graceful shutdown.

use crate::app::build_app;
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::{ensure_database_exists, PgStore, Store};
use crate::APP_TITLE;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Setup phase. Must finish before the listener is bound; any error is fatal.
pub async fn startup(store: &dyn Store) -> Result<(), AppError> {
    store.ensure_schema().await?;
    info!("database schema ready");
    Ok(())
}

/// Connect to PostgreSQL and serve until a shutdown signal arrives.
pub async fn serve(config: Config) -> Result<(), AppError> {
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    run(config, Arc::new(PgStore::new(pool))).await
}

/// Run setup, then serve on the configured address. No teardown is registered.
pub async fn run(config: Config, store: Arc<dyn Store>) -> Result<(), AppError> {
    startup(store.as_ref()).await?;

    let state = AppState::new(store, &config);
    let app = build_app(state, &config)?;
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(title = APP_TITLE, "listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("received Ctrl+C, shutting down"),
        _ = terminate => warn!("received SIGTERM, shutting down"),
    }
}
