//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`                          - Short link redirect (public)
//! - `GET  /ShortLinks/RedirectToOriginal`   - Redirect by full short URL (public)
//! - `GET  /health`                          - Health check (public)
//! - `/api/*`                                - REST API (Bearer token required for writes)
//! - `/`, `/ShortLinks/*`, `/Home/*`, `/Account/*` - Web pages (cookie auth for writes)
//! - `/static/*`                             - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on mutating routes
//! - **Authentication** - Bearer token (API) or `auth_token` cookie (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, redirect_to_original_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, true))
}

/// Builds the router, optionally without rate limiting.
///
/// `rate_limited = false` is meant for in-process tests that have no peer address.
pub fn build_router(state: AppState, rate_limited: bool) -> Router {
    let api_protected = api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::layer),
    );
    let api_public = api::routes::public_routes();

    let web_protected =
        web::routes::protected_routes().route_layer(middleware::from_fn(web_auth::require));
    let web_public = web::routes::public_routes();

    let (api_protected, api_public, web_protected, web_public) = if rate_limited {
        (
            api_protected.layer(rate_limit::secure_layer()),
            api_public.layer(rate_limit::layer()),
            web_protected.layer(rate_limit::secure_layer()),
            web_public.layer(rate_limit::layer()),
        )
    } else {
        (api_protected, api_public, web_protected, web_public)
    };

    let api_router = Router::new().merge(api_public).merge(api_protected);

    let web_router = Router::new()
        .merge(web_public)
        .merge(web_protected)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::identify,
        ));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route(
            "/ShortLinks/RedirectToOriginal",
            get(redirect_to_original_handler),
        )
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
