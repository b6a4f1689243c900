//! Route groups. Each builds a self-contained `Router` over the shared state.

mod auth;
mod cars;
mod common;
mod web;

pub use auth::auth_routes;
pub use cars::cars_routes;
pub use common::common_routes;
pub use web::web_routes;
