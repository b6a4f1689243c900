//! Authentication routes under `/auth`.

use crate::handlers::auth::{me, register, token};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/token", post(token))
        .route("/auth/me", get(me))
        .with_state(state)
}
