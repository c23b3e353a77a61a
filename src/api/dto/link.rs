//! DTOs for short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::LinkService;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;

/// Request body for `POST /api/links`.
///
/// The URL may omit its scheme; `https://` is assumed.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: String,
}

/// Request body for `PATCH /api/links/{id}`.
///
/// `version` is the value last read by the client; the update is rejected with
/// `409 Conflict` when the link changed in the meantime.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: String,

    #[validate(range(min = 1))]
    pub version: i64,
}

/// JSON representation of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_by: String,
    pub created_date: DateTime<Utc>,
    pub redirect_count: i64,
    pub version: i64,
}

impl LinkResponse {
    pub fn from_link<L: ShortLinkRepository + ?Sized>(
        link: ShortLink,
        service: &LinkService<L>,
    ) -> Self {
        Self {
            short_url: service.short_url(&link),
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            created_by: link.created_by,
            created_date: link.created_date,
            redirect_count: link.redirect_count,
            version: link.version,
        }
    }
}

/// Paginated link listing.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<LinkResponse>,
}
