//! Handlers for short link endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkListResponse, LinkResponse, UpdateLinkRequest};
use crate::api::dto::pagination::PaginationParams;
use crate::api::extractors::CurrentUser;
use crate::api::handlers::redirect::RedirectQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link:
///
/// ```json
/// {
///   "id": 1,
///   "short_code": "Ab12Cd34Ef",
///   "short_url": "short.com/Ab12Cd34Ef",
///   "original_url": "https://example.com/some/page",
///   "created_by": "alice@example.com",
///   "created_date": "2024-05-01T12:00:00Z",
///   "redirect_count": 0,
///   "version": 1
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL is blank or malformed
/// - 401 Unauthorized without a valid token
/// - 503 Service Unavailable if no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;
    let principal = user.require()?;

    let link = state
        .link_service
        .create_short_link(&payload.original_url, principal)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.link_service)),
    ))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=25`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (page, page_size) = params
        .validate_and_get_page()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state.link_service.list_links(page, page_size).await?;

    let items = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.link_service))
        .collect();

    Ok(Json(LinkListResponse {
        page,
        page_size,
        total,
        items,
    }))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(link, &state.link_service)))
}

/// Looks up a link by its code or full short URL without following it.
///
/// # Endpoint
///
/// `GET /api/links/lookup?shortUrl=short.com/Ab12Cd34Ef`
///
/// The redirect counter is left untouched.
///
/// # Errors
///
/// - 400 Bad Request if `shortUrl` is missing or blank
/// - 404 Not Found if no link uses the code
pub async fn lookup_link_handler(
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.lookup(&query.short_url).await?;

    Ok(Json(LinkResponse::from_link(link, &state.link_service)))
}

/// Changes the original URL of a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://new-destination.com", "version": 1 }
/// ```
///
/// # Errors
///
/// - 403 Forbidden unless the caller owns the link or is an administrator
/// - 404 Not Found if the link does not exist
/// - 409 Conflict if `version` is stale
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;
    let principal = user.require()?;

    let link = state
        .link_service
        .update_link(id, &payload.original_url, payload.version, principal)
        .await?;

    Ok(Json(LinkResponse::from_link(link, &state.link_service)))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// - 403 Forbidden unless the caller owns the link or is an administrator
/// - 404 Not Found if the link does not exist
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, AppError> {
    let principal = user.require()?;

    state.link_service.delete_link(id, principal).await?;

    Ok(StatusCode::NO_CONTENT)
}
