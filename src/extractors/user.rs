//! Resolve the signed-in user from an `Authorization: Bearer` header.

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

const REJECTION: &str = "Username or password incorrect";

/// Extractor for the user a valid bearer token was issued to.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Unauthorized(REJECTION.into()))?;
        let username = state
            .tokens
            .verify(token)
            .ok_or_else(|| AppError::Unauthorized(REJECTION.into()))?;
        let user = state
            .store
            .find_user(&username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(REJECTION.into()))?;
        Ok(CurrentUser(user))
    }
}
