//! In-memory store for router tests.

use super::Store;
use crate::error::AppError;
use crate::models::{Car, CarFilter, CarInput, CarOutput, Trip, TripInput, User};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    cars: Vec<Car>,
    trips: Vec<Trip>,
    users: Vec<User>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    pub schema_runs: AtomicUsize,
    pub fail_schema: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose schema setup always fails.
    pub fn failing() -> Self {
        Self {
            fail_schema: true,
            ..Self::default()
        }
    }

    fn poisoned() -> AppError {
        AppError::Internal("memory store lock poisoned".into())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        if self.fail_schema {
            return Err(AppError::Internal("schema unavailable".into()));
        }
        self.schema_runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_cars(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.cars.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn get_car(&self, id: i64) -> Result<Option<CarOutput>, AppError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.cars.iter().find(|c| c.id == id).map(|car| CarOutput {
            car: car.clone(),
            trips: tables.trips.iter().filter(|t| t.car_id == id).cloned().collect(),
        }))
    }

    async fn create_car(&self, input: &CarInput) -> Result<Car, AppError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let car = Car::from_input(tables.next_id(), input);
        tables.cars.push(car.clone());
        Ok(car)
    }

    async fn update_car(&self, id: i64, input: &CarInput) -> Result<Option<Car>, AppError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        Ok(tables.cars.iter_mut().find(|c| c.id == id).map(|car| {
            *car = Car::from_input(id, input);
            car.clone()
        }))
    }

    async fn delete_car(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let before = tables.cars.len();
        tables.cars.retain(|c| c.id != id);
        tables.trips.retain(|t| t.car_id != id);
        Ok(tables.cars.len() < before)
    }

    async fn add_trip(&self, car_id: i64, input: &TripInput) -> Result<Trip, AppError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        if !tables.cars.iter().any(|c| c.id == car_id) {
            return Err(AppError::NotFound(format!("car {}", car_id)));
        }
        let trip = Trip {
            id: tables.next_id(),
            start: input.start,
            end: input.end,
            description: input.description.clone(),
            car_id,
        };
        tables.trips.push(trip.clone());
        Ok(trip)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!("username '{}' is taken", username)));
        }
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}
