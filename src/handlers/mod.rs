//! HTTP handlers for the cars, auth and web route groups.

pub mod auth;
pub mod cars;
pub mod web;
