//! DTOs for the about page endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::AboutPage;

/// Request body for `PUT /api/about`.
#[derive(Debug, Deserialize)]
pub struct UpdateAboutRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub content: String,
    pub last_modified: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl From<AboutPage> for AboutResponse {
    fn from(page: AboutPage) -> Self {
        Self {
            content: page.content,
            last_modified: page.last_modified,
            modified_by: page.modified_by,
        }
    }
}
