//! Short link pages: list, details, create, edit and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::api::dto::pagination::PaginationParams;
use crate::api::extractors::CurrentUser;
use crate::domain::entities::ShortLink;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::error::WebError;

/// Row model shared by the list, details, edit and delete pages.
pub struct LinkView {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_by: String,
    pub created_date: String,
    pub redirect_count: i64,
    pub version: i64,
    pub can_manage: bool,
}

impl LinkView {
    fn new(link: ShortLink, state: &AppState, user: &CurrentUser) -> Self {
        let can_manage = user
            .0
            .as_ref()
            .is_some_and(|p| link.is_owned_by(p.name()) || p.is_admin());

        Self {
            short_url: state.link_service.short_url(&link),
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            created_by: link.created_by,
            created_date: link.created_date.format("%Y-%m-%d %H:%M UTC").to_string(),
            redirect_count: link.redirect_count,
            version: link.version,
            can_manage,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    current_user: Option<String>,
    links: Vec<LinkView>,
    page: i64,
    page_size: i64,
    total: i64,
    has_next: bool,
}

/// Renders the paginated link list.
///
/// # Endpoint
///
/// `GET /?page=1&page_size=25`
pub async fn index_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, WebError> {
    let (page, page_size) = params
        .validate_and_get_page()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state.link_service.list_links(page, page_size).await?;

    Ok(IndexTemplate {
        current_user: user.0.as_ref().map(|p| p.name().to_string()),
        has_next: page * page_size < total,
        links: links
            .into_iter()
            .map(|link| LinkView::new(link, &state, &user))
            .collect(),
        page,
        page_size,
        total,
    })
}

#[derive(Template, WebTemplate)]
#[template(path = "details.html")]
struct DetailsTemplate {
    current_user: Option<String>,
    link: LinkView,
}

/// `GET /ShortLinks/Details/{id}`
pub async fn details_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, WebError> {
    let link = state.link_service.get_link(id).await?;

    Ok(DetailsTemplate {
        current_user: user.0.as_ref().map(|p| p.name().to_string()),
        link: LinkView::new(link, &state, &user),
    })
}

#[derive(Template, WebTemplate)]
#[template(path = "create.html")]
struct CreateTemplate {
    current_user: Option<String>,
    original_url: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkForm {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: String,
}

/// First human-readable message in a set of form errors.
fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}

/// `GET /ShortLinks/Create`
pub async fn create_page_handler(user: CurrentUser) -> impl IntoResponse {
    CreateTemplate {
        current_user: Some(user.name().to_string()),
        original_url: String::new(),
        error: None,
    }
}

/// Creates a link from the form and shows its details page.
///
/// # Endpoint
///
/// `POST /ShortLinks/Create`
///
/// Validation failures redisplay the form with the submitted value and the
/// error message (`400 Bad Request`).
pub async fn create_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<CreateLinkForm>,
) -> Result<Response, WebError> {
    let principal = user.require()?;

    let redisplay = |message: String, original_url: String| {
        (
            StatusCode::BAD_REQUEST,
            CreateTemplate {
                current_user: Some(principal.name().to_string()),
                original_url,
                error: Some(message),
            },
        )
            .into_response()
    };

    if let Err(e) = form.validate() {
        return Ok(redisplay(validation_message(&e), form.original_url));
    }

    match state
        .link_service
        .create_short_link(&form.original_url, principal)
        .await
    {
        Ok(link) => Ok(Redirect::to(&format!("/ShortLinks/Details/{}", link.id)).into_response()),
        Err(AppError::Validation { message, .. }) => Ok(redisplay(message, form.original_url)),
        Err(e) => Err(e.into()),
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "edit.html")]
struct EditTemplate {
    current_user: Option<String>,
    link: LinkView,
    original_url: String,
    version: i64,
    error: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditLinkForm {
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: String,

    #[validate(range(min = 1, message = "Unknown link version"))]
    pub version: i64,
}

/// Loads a link and checks that `user` may change it.
async fn manageable_link(
    id: i64,
    state: &AppState,
    user: &CurrentUser,
) -> Result<LinkView, AppError> {
    let link = state.link_service.get_link(id).await?;
    let view = LinkView::new(link, state, user);

    if !view.can_manage {
        return Err(AppError::forbidden(
            "Only the owner or an administrator may change this link",
            json!({ "id": id }),
        ));
    }

    Ok(view)
}

/// Shows the edit form prefilled with the current destination.
///
/// # Endpoint
///
/// `GET /ShortLinks/Edit/{id}`
pub async fn edit_page_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, WebError> {
    let view = manageable_link(id, &state, &user).await?;

    Ok(EditTemplate {
        current_user: Some(user.name().to_string()),
        original_url: view.original_url.clone(),
        version: view.version,
        link: view,
        error: None,
    })
}

/// Changes a link's destination and shows its details page.
///
/// # Endpoint
///
/// `POST /ShortLinks/Edit/{id}`
///
/// The form carries the version it was rendered from. Invalid input redisplays the
/// form with `400 Bad Request`; a concurrent edit redisplays it with `409 Conflict`
/// and the latest version.
pub async fn edit_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<EditLinkForm>,
) -> Result<Response, WebError> {
    let principal = user.require()?;

    let redisplay = |status: StatusCode, message: String, link: LinkView, version: i64| {
        (
            status,
            EditTemplate {
                current_user: Some(principal.name().to_string()),
                link,
                original_url: form.original_url.clone(),
                version,
                error: Some(message),
            },
        )
            .into_response()
    };

    if let Err(e) = form.validate() {
        let view = manageable_link(id, &state, &user).await?;
        return Ok(redisplay(
            StatusCode::BAD_REQUEST,
            validation_message(&e),
            view,
            form.version,
        ));
    }

    match state
        .link_service
        .update_link(id, &form.original_url, form.version, principal)
        .await
    {
        Ok(link) => Ok(Redirect::to(&format!("/ShortLinks/Details/{}", link.id)).into_response()),
        Err(AppError::Validation { message, .. }) => {
            let view = manageable_link(id, &state, &user).await?;
            Ok(redisplay(StatusCode::BAD_REQUEST, message, view, form.version))
        }
        Err(AppError::Conflict { message, .. }) => {
            let view = manageable_link(id, &state, &user).await?;
            let current = view.version;
            Ok(redisplay(StatusCode::CONFLICT, message, view, current))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "delete.html")]
struct DeleteTemplate {
    current_user: Option<String>,
    link: LinkView,
}

/// Asks for confirmation before deleting.
///
/// # Endpoint
///
/// `GET /ShortLinks/Delete/{id}`
pub async fn delete_page_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, WebError> {
    let view = manageable_link(id, &state, &user).await?;

    Ok(DeleteTemplate {
        current_user: Some(user.name().to_string()),
        link: view,
    })
}

/// `POST /ShortLinks/Delete/{id}`
pub async fn delete_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Redirect, WebError> {
    let principal = user.require()?;

    state.link_service.delete_link(id, principal).await?;

    Ok(Redirect::to("/"))
}
