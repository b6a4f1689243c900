//! Registration, token issuing and the current-user endpoint.

use crate::error::AppError;
use crate::extractors::user::CurrentUser;
use crate::models::UserOutput;
use crate::response::{created, success_one};
use crate::security::{hash_password, verify_password};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Form, Json};
use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// OAuth2 password-grant form fields.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = req.username.as_str();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".into()));
    }
    // Stored verbatim, so login must match it exactly.
    if username.trim() != username {
        return Err(AppError::Validation(
            "username must not start or end with whitespace".into(),
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    let hash = hash_password(&req.password)?;
    let user = state.store.create_user(username, &hash).await?;
    tracing::info!(user = %user.username, "user registered");
    Ok(created(UserOutput::from(user)))
}

pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.store.find_user(&form.username).await?;
    match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => {
            let access_token = state.tokens.issue(&user.username)?;
            Ok(Json(TokenResponse {
                access_token,
                token_type: "bearer".into(),
            }))
        }
        _ => Err(AppError::BadRequest("Incorrect username or password".into())),
    }
}

pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    success_one(UserOutput::from(user))
}
