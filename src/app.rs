//! Application assembly: route groups plus the middleware stack.

use crate::config::Config;
use crate::cors::cors_layer;
use crate::error::AppError;
use crate::middleware::add_cars_cookie;
use crate::routes::{auth_routes, cars_routes, common_routes, web_routes};
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Build the full application. Groups must not define overlapping routes;
/// `Router::merge` panics on overlap, so a bad group never reaches serving.
pub fn build_app(state: AppState, config: &Config) -> Result<Router, AppError> {
    let routes = Router::new()
        .merge(web_routes(state.clone()))
        .merge(cars_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(common_routes(state));

    // Outermost first: the cookie stage sees every response, including CORS
    // preflights and body-limit rejections.
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(add_cars_cookie))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(cors_layer(&config.cors_origins)?);

    Ok(routes.layer(middleware))
}
