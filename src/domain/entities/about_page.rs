//! About page entity.

use chrono::{DateTime, Utc};

/// Placeholder shown until an administrator saves the first version.
pub const DEFAULT_ABOUT_CONTENT: &str = "About page not configured yet.";

/// The publicly readable "About" document.
///
/// Only the most recently modified row is ever shown. `id` is `None` for the
/// unsaved placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutPage {
    pub id: Option<i64>,
    pub content: String,
    pub last_modified: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl AboutPage {
    /// Builds the unsaved placeholder page.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            content: DEFAULT_ABOUT_CONTENT.to_string(),
            last_modified: now,
            modified_by: None,
        }
    }
}
