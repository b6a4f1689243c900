//! Domain types for cars, trips and users.

use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_fuel() -> Option<String> {
    Some("electric".into())
}

fn default_transmission() -> Option<String> {
    Some("auto".into())
}

/// Car fields accepted on create and update.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CarInput {
    pub size: String,
    #[serde(default = "default_fuel")]
    pub fuel: Option<String>,
    pub doors: i32,
    #[serde(default = "default_transmission")]
    pub transmission: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    pub id: i64,
    pub size: String,
    pub fuel: Option<String>,
    pub doors: i32,
    pub transmission: Option<String>,
}

impl Car {
    pub fn from_input(id: i64, input: &CarInput) -> Self {
        Self {
            id,
            size: input.size.clone(),
            fuel: input.fuel.clone(),
            doors: input.doors,
            transmission: input.transmission.clone(),
        }
    }
}

/// A car together with its recorded trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarOutput {
    #[serde(flatten)]
    pub car: Car,
    pub trips: Vec<Trip>,
}

/// Filters for car listings. `doors` is a lower bound.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilter {
    pub size: Option<String>,
    pub doors: Option<i32>,
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        self.size.as_deref().map_or(true, |s| car.size == s)
            && self.doors.map_or(true, |d| car.doors >= d)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripInput {
    pub start: i32,
    pub end: i32,
    pub description: String,
}

impl TripInput {
    pub fn validate(&self) -> Result<(), BadTrip> {
        if self.end < self.start {
            return Err(BadTrip {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub start: i32,
    pub end: i32,
    pub description: String,
    pub car_id: i64,
}

/// Raised when a trip ends before it starts.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("trip end {end} is before start {start}")]
pub struct BadTrip {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserOutput {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserOutput {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
