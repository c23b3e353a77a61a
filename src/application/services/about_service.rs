//! About page content service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{AboutPage, Principal};
use crate::domain::repositories::AboutRepository;
use crate::error::AppError;
use crate::utils::clock::Clock;

/// Reads and edits the single about page.
pub struct AboutService<R: AboutRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: AboutRepository + ?Sized> AboutService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns the latest about page, or a placeholder when none was saved yet.
    pub async fn get_about(&self) -> Result<AboutPage, AppError> {
        Ok(self
            .repository
            .latest()
            .await?
            .unwrap_or_else(|| AboutPage::placeholder(self.clock.now())))
    }

    /// Replaces the about page content.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` is an administrator.
    pub async fn edit_about(&self, content: &str, actor: &Principal) -> Result<AboutPage, AppError> {
        if !actor.is_admin() {
            tracing::warn!(user = %actor.name(), "Non-administrator tried to edit the about page");
            return Err(AppError::forbidden(
                "Only administrators may edit the about page",
                json!({}),
            ));
        }

        let page = self
            .repository
            .save(content, actor.name(), self.clock.now())
            .await?;

        tracing::info!(user = %actor.name(), "About page updated");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::domain::entities::about_page::DEFAULT_ABOUT_CONTENT;
    use crate::domain::repositories::MockAboutRepository;
    use crate::utils::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
    }

    #[tokio::test]
    async fn test_get_about_returns_placeholder_when_empty() {
        let mut repo = MockAboutRepository::new();
        repo.expect_latest().returning(|| Ok(None));

        let page = AboutService::new(Arc::new(repo), clock())
            .get_about()
            .await
            .unwrap();

        assert_eq!(page.content, DEFAULT_ABOUT_CONTENT);
        assert!(page.id.is_none());
    }

    #[tokio::test]
    async fn test_edit_about_by_admin_is_saved() {
        let mut repo = MockAboutRepository::new();
        repo.expect_save()
            .withf(|content, modified_by, _| content == "Hello" && modified_by == "admin@admin.com")
            .times(1)
            .returning(|content, modified_by, modified_at| {
                Ok(AboutPage {
                    id: Some(1),
                    content: content.to_string(),
                    last_modified: modified_at,
                    modified_by: Some(modified_by.to_string()),
                })
            });

        let admin = Principal::new("admin@admin.com", [Role::Administrator]);
        let page = AboutService::new(Arc::new(repo), clock())
            .edit_about("Hello", &admin)
            .await
            .unwrap();

        assert_eq!(page.content, "Hello");
        assert_eq!(page.modified_by.as_deref(), Some("admin@admin.com"));
    }

    #[tokio::test]
    async fn test_edit_about_by_user_is_forbidden() {
        let mut repo = MockAboutRepository::new();
        repo.expect_save().times(0);

        let user = Principal::new("alice@example.com", [Role::User]);
        let result = AboutService::new(Arc::new(repo), clock())
            .edit_about("Hello", &user)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden { .. })));
    }
}
