//! Handlers for the about page endpoints.

use axum::{Json, extract::State};

use crate::api::dto::about::{AboutResponse, UpdateAboutRequest};
use crate::api::extractors::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/about`
pub async fn get_about_handler(
    State(state): State<AppState>,
) -> Result<Json<AboutResponse>, AppError> {
    let page = state.about_service.get_about().await?;

    Ok(Json(page.into()))
}

/// Replaces the about page content.
///
/// # Endpoint
///
/// `PUT /api/about`
///
/// # Errors
///
/// Returns 403 Forbidden unless the caller is an administrator.
pub async fn update_about_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateAboutRequest>,
) -> Result<Json<AboutResponse>, AppError> {
    let principal = user.require()?;

    let page = state
        .about_service
        .edit_about(&payload.content, principal)
        .await?;

    Ok(Json(page.into()))
}
