//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    about_handler, create_handler, create_page_handler, delete_handler, delete_page_handler,
    details_handler, edit_about_handler, edit_handler, edit_page_handler, index_handler,
    login_handler, login_page_handler, logout_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages that require a signed-in user.
///
/// Protected via [`crate::web::middleware::web_auth::require`].
///
/// # Endpoints
///
/// - `GET/POST /ShortLinks/Create`      - Create form
/// - `GET/POST /ShortLinks/Edit/{id}`   - Change the destination (owner or administrator)
/// - `GET/POST /ShortLinks/Delete/{id}` - Delete confirmation (owner or administrator)
/// - `POST     /Home/EditAbout`         - Replace the about page (administrator)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ShortLinks/Create",
            get(create_page_handler).post(create_handler),
        )
        .route(
            "/ShortLinks/Edit/{id}",
            get(edit_page_handler).post(edit_handler),
        )
        .route(
            "/ShortLinks/Delete/{id}",
            get(delete_page_handler).post(delete_handler),
        )
        .route("/Home/EditAbout", post(edit_about_handler))
}

/// Pages open to everyone.
///
/// # Endpoints
///
/// - `GET  /`                       - Link list
/// - `GET  /ShortLinks/Details/{id}` - Link details
/// - `GET  /Home/About`             - About page
/// - `GET/POST /Account/Login`      - Sign in with an API token
/// - `POST /Account/Logout`         - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/ShortLinks/Details/{id}", get(details_handler))
        .route("/Home/About", get(about_handler))
        .route(
            "/Account/Login",
            get(login_page_handler).post(login_handler),
        )
        .route("/Account/Logout", post(logout_handler))
}
