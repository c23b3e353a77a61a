//! Cookie-based authentication middleware for the web pages.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::domain::entities::Principal;
use crate::state::AppState;

/// Name of the cookie holding the caller's API token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/Account/Login";

/// Extracts the `auth_token` value from the `Cookie` header.
///
/// Handles multiple cookies in the `Cookie` header by:
/// - Splitting on semicolons
/// - Extracting the `auth_token` key-value pair
/// - Ignoring other cookies
pub fn auth_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(AUTH_COOKIE), Some(value)) if !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}

/// Identifies the caller from the `auth_token` cookie, if present.
///
/// # Authentication Flow
///
/// 1. Extract `auth_token` cookie from request
/// 2. Validate token via [`crate::application::services::auth_service::AuthService`]
/// 3. On success, store the [`Principal`] in request extensions
/// 4. Continue to the handler either way; invalid cookies are treated as anonymous
///
/// Pages that require a user are additionally wrapped in [`require`].
pub async fn identify(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = auth_cookie(req.headers()) {
        match st.auth_service.authenticate(&token).await {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid auth cookie"),
        }
    }

    next.run(req).await
}

/// Redirects anonymous callers to the sign-in page.
///
/// Unlike the API auth middleware which returns `401 Unauthorized`,
/// this middleware redirects to the login page, passing the requested path as
/// `returnUrl`.
pub async fn require(req: Request, next: Next) -> Result<Response, Redirect> {
    if req.extensions().get::<Principal>().is_some() {
        return Ok(next.run(req).await);
    }

    let requested = req
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());
    let return_url: String = url::form_urlencoded::byte_serialize(requested.as_bytes()).collect();

    Err(Redirect::to(&format!("{LOGIN_PATH}?returnUrl={return_url}")))
}
