//! Handlers for short URL redirects.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::redirect_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Codes are matched case-sensitively. Every successful lookup increments the
/// link's redirect counter before the `307 Temporary Redirect` is returned. Non-ASCII
/// targets are sent in their encoded form.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.link_service.resolve(&code).await?;

    Ok(Redirect::temporary(&redirect_location(&original_url)))
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(rename = "shortUrl", default)]
    pub short_url: String,
}

/// Redirects a full short URL (e.g. `short.com/Ab12Cd34Ef`) or bare code.
///
/// # Endpoint
///
/// `GET /ShortLinks/RedirectToOriginal?shortUrl=short.com/Ab12Cd34Ef`
///
/// # Errors
///
/// Returns 400 Bad Request if `shortUrl` is missing or blank.
/// Returns 404 Not Found if the code doesn't exist.
pub async fn redirect_to_original_handler(
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.link_service.resolve(&query.short_url).await?;

    Ok(Redirect::temporary(&redirect_location(&original_url)))
}
