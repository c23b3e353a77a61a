//! API route configuration.
//!
//! Mutating endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; reads are public.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_about_handler, get_link_handler,
    list_links_handler, lookup_link_handler, update_about_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post, put},
};

/// Read-only API routes.
///
/// # Endpoints
///
/// - `GET /links`                   - Paginated link list, newest first
/// - `GET /links/lookup?shortUrl=…` - Link behind a short URL, without counting a visit
/// - `GET /links/{id}`              - Single link
/// - `GET /about`                   - About page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler))
        .route("/links/lookup", get(lookup_link_handler))
        .route("/links/{id}", get(get_link_handler))
        .route("/about", get(get_about_handler))
}

/// Mutating API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /links`      - Create a short link
/// - `PATCH  /links/{id}` - Change a link's original URL (owner or administrator)
/// - `DELETE /links/{id}` - Delete a link (owner or administrator)
/// - `PUT    /about`      - Replace the about page (administrator)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route(
            "/links/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route("/about", put(update_about_handler))
}
