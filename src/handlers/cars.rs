//! Car and trip handlers.

use crate::error::AppError;
use crate::extractors::user::CurrentUser;
use crate::models::{CarFilter, CarInput, TripInput};
use crate::response::{created, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn car_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("no car with id={}", id))
}

pub async fn list_cars(
    State(state): State<AppState>,
    Query(filter): Query<CarFilter>,
) -> Result<impl IntoResponse, AppError> {
    let cars = state.store.list_cars(&filter).await?;
    Ok(success_many(cars))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let car = state.store.get_car(id).await?.ok_or_else(|| car_not_found(id))?;
    Ok(success_one(car))
}

pub async fn create_car(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CarInput>,
) -> Result<impl IntoResponse, AppError> {
    let car = state.store.create_car(&input).await?;
    tracing::info!(car_id = car.id, user = %user.username, "car created");
    Ok(created(car))
}

pub async fn update_car(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
    Json(input): Json<CarInput>,
) -> Result<impl IntoResponse, AppError> {
    let car = state
        .store
        .update_car(id, &input)
        .await?
        .ok_or_else(|| car_not_found(id))?;
    Ok(success_one(car))
}

pub async fn delete_car(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store.delete_car(id).await? {
        return Err(car_not_found(id));
    }
    tracing::info!(car_id = id, user = %user.username, "car deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Record a trip. A trip that ends before it starts is a [`crate::models::BadTrip`].
pub async fn add_trip(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Json(input): Json<TripInput>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.get_car(car_id).await?.is_none() {
        return Err(car_not_found(car_id));
    }
    input.validate()?;
    let trip = state.store.add_trip(car_id, &input).await?;
    Ok(created(trip))
}
