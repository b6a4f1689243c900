//! Persistence port for cars, trips and users, with a PostgreSQL implementation.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::models::{Car, CarFilter, CarInput, CarOutput, Trip, TripInput, User};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Create every table the API needs if it is missing. Safe to run repeatedly.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_cars(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError>;
    async fn get_car(&self, id: i64) -> Result<Option<CarOutput>, AppError>;
    async fn create_car(&self, input: &CarInput) -> Result<Car, AppError>;
    async fn update_car(&self, id: i64, input: &CarInput) -> Result<Option<Car>, AppError>;
    /// Returns false when no car had that id. Trips of the car are removed with it.
    async fn delete_car(&self, id: i64) -> Result<bool, AppError>;
    async fn add_trip(&self, car_id: i64, input: &TripInput) -> Result<Trip, AppError>;

    /// Fails with [`AppError::Conflict`] when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;
}
