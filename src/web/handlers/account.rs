//! Sign-in and sign-out handlers.
//!
//! Signing in exchanges an API token for an `auth_token` cookie; the same token
//! authenticates both the JSON API and the web pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::extractors::CurrentUser;
use crate::state::AppState;
use crate::web::middleware::web_auth::AUTH_COOKIE;

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    current_user: Option<String>,
    return_url: String,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "returnUrl", default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "returnUrl", default)]
    pub return_url: Option<String>,
}

/// Only same-site paths are followed after sign-in.
fn safe_return_url(return_url: Option<&str>) -> String {
    match return_url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.contains('\\') => {
            url.to_string()
        }
        _ => "/".to_string(),
    }
}

/// `GET /Account/Login`
pub async fn login_page_handler(
    user: CurrentUser,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        current_user: user.0.as_ref().map(|p| p.name().to_string()),
        return_url: safe_return_url(query.return_url.as_deref()),
        error: None,
    }
}

/// Validates the submitted token and stores it in the `auth_token` cookie.
///
/// # Endpoint
///
/// `POST /Account/Login`
pub async fn login_handler(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let return_url = safe_return_url(form.return_url.as_deref());
    let token = form.token.trim();

    match state.auth_service.authenticate(token).await {
        Ok(principal) => {
            tracing::info!(user = %principal.name(), "Signed in");

            let cookie = format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    let mut response = Redirect::to(&return_url).into_response();
                    response.headers_mut().insert(SET_COOKIE, value);
                    response
                }
                Err(_) => login_failed(return_url, "Token contains invalid characters"),
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Sign-in rejected");
            login_failed(return_url, "Invalid or revoked token")
        }
    }
}

fn login_failed(return_url: String, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        LoginTemplate {
            current_user: None,
            return_url,
            error: Some(message.to_string()),
        },
    )
        .into_response()
}

/// Clears the `auth_token` cookie.
///
/// # Endpoint
///
/// `POST /Account/Logout`
pub async fn logout_handler() -> Response {
    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_static("auth_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return_url_accepts_local_paths() {
        assert_eq!(safe_return_url(Some("/ShortLinks/Create")), "/ShortLinks/Create");
    }

    #[test]
    fn test_safe_return_url_rejects_other_sites() {
        assert_eq!(safe_return_url(Some("https://evil.example")), "/");
        assert_eq!(safe_return_url(Some("//evil.example")), "/");
        assert_eq!(safe_return_url(Some("/\\evil.example")), "/");
        assert_eq!(safe_return_url(None), "/");
    }
}
