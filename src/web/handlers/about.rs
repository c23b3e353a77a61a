//! About page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::api::extractors::CurrentUser;
use crate::domain::entities::Role;
use crate::state::AppState;
use crate::web::handlers::error::WebError;

#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
struct AboutTemplate {
    current_user: Option<String>,
    content: String,
    last_modified: String,
    modified_by: Option<String>,
    can_edit: bool,
}

/// Renders the about page; administrators also get the edit form.
///
/// # Endpoint
///
/// `GET /Home/About`
pub async fn about_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, WebError> {
    let page = state.about_service.get_about().await?;

    Ok(AboutTemplate {
        current_user: user.0.as_ref().map(|p| p.name().to_string()),
        content: page.content,
        last_modified: page.last_modified.format("%Y-%m-%d %H:%M UTC").to_string(),
        modified_by: page.modified_by,
        can_edit: user.has_role(Role::Administrator),
    })
}

#[derive(Debug, Deserialize)]
pub struct EditAboutForm {
    #[serde(default)]
    pub content: String,
}

/// `POST /Home/EditAbout` (administrators only)
pub async fn edit_about_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<EditAboutForm>,
) -> Result<Redirect, WebError> {
    let principal = user.require()?;

    state.about_service.edit_about(&form.content, principal).await?;

    Ok(Redirect::to("/Home/About"))
}
