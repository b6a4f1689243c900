//! Car sharing REST API: cars and trips, user auth, and a small HTML front end.

pub mod app;
pub mod config;
pub mod cors;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod response;
pub mod routes;
pub mod security;
pub mod server;
pub mod state;
pub mod store;

pub use app::build_app;
pub use config::Config;
pub use error::{AppError, ConfigError};
pub use models::BadTrip;
pub use server::{run, serve, startup};
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, Store};

/// Application title shown in pages and reported by `/version`.
pub const APP_TITLE: &str = "Car Sharing";

/// Install the global `fmt` subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
