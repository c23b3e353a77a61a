//! Repository trait for the about page.

use crate::domain::entities::AboutPage;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage for the single logical about page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Returns the most recently modified page, if any was saved.
    async fn latest(&self) -> Result<Option<AboutPage>, AppError>;

    /// Updates the most recent row in place, or inserts the first one.
    async fn save(
        &self,
        content: &str,
        modified_by: &str,
        modified_at: DateTime<Utc>,
    ) -> Result<AboutPage, AppError>;
}
