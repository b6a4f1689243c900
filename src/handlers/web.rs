//! HTML pages: home with a search form, and search results.

use crate::error::AppError;
use crate::middleware::{cookie_value, CARS_COOKIE_NAME};
use crate::models::CarFilter;
use crate::pages;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Html,
    Form,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub size: String,
    pub doors: i32,
}

pub async fn home(headers: HeaderMap) -> Html<String> {
    let visited = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| cookie_value(h, CARS_COOKIE_NAME));
    tracing::debug!(cars_cookie = ?visited, "home page");
    Html(pages::home())
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let filter = CarFilter {
        size: Some(form.size),
        doors: Some(form.doors),
    };
    let cars = state.store.list_cars(&filter).await?;
    Ok(Html(pages::search_results(&cars)))
}
