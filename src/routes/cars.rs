//! Car and trip routes under `/api/cars`.

use crate::handlers::cars::{add_trip, create_car, delete_car, get_car, list_cars, update_car};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn cars_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/cars", get(list_cars).post(create_car))
        .route(
            "/api/cars/:id",
            get(get_car).put(update_car).delete(delete_car),
        )
        .route("/api/cars/:id/trips", post(add_trip))
        .with_state(state)
}
