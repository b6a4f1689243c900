//! Browser-facing pages.

use crate::handlers::web::{home, search};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn web_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", post(search))
        .with_state(state)
}
