//! Short link entity representing a code-to-URL mapping.

use chrono::{DateTime, Utc};

/// A generated short code mapped to the address it redirects to.
///
/// `short_code` is unique across all records. `redirect_count` only ever grows: it is
/// bumped once per successful resolution. `version` is bumped by every edit and used
/// for optimistic concurrency checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_by: String,
    pub created_date: DateTime<Utc>,
    pub redirect_count: i64,
    pub version: i64,
}

impl ShortLink {
    /// Returns true if `user_name` created this link.
    pub fn is_owned_by(&self, user_name: &str) -> bool {
        self.created_by == user_name
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub created_by: String,
    pub created_date: DateTime<Utc>,
}
