//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Implementations must enforce uniqueness of `short_code` themselves (a unique
/// constraint in PostgreSQL); the existence check used during code generation is
/// advisory and can race with concurrent inserts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryShortLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link with `redirect_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeTaken`] if the short code is already stored.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its exact (case-sensitive) short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns true if any link uses `code`.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links newest first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Replaces the original URL if the stored version still equals `expected_version`.
    ///
    /// Bumps `version` on success.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` with the updated record
    /// - `Ok(None)` if no record matched `id` and `expected_version`
    async fn update_original_url(
        &self,
        id: i64,
        original_url: &str,
        expected_version: i64,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments `redirect_count` for the link with `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` with the counter already incremented
    /// - `Ok(None)` if no link uses `code`
    async fn record_redirect(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if a record was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
