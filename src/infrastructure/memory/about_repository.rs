//! In-memory implementation of about page repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::AboutPage;
use crate::domain::repositories::AboutRepository;
use crate::error::AppError;

/// About page repository kept in process memory.
#[derive(Default)]
pub struct InMemoryAboutRepository {
    page: RwLock<Option<AboutPage>>,
}

impl InMemoryAboutRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AboutRepository for InMemoryAboutRepository {
    async fn latest(&self) -> Result<Option<AboutPage>, AppError> {
        Ok(self.page.read().await.clone())
    }

    async fn save(
        &self,
        content: &str,
        modified_by: &str,
        modified_at: DateTime<Utc>,
    ) -> Result<AboutPage, AppError> {
        let mut page = self.page.write().await;

        let saved = AboutPage {
            id: Some(page.as_ref().and_then(|p| p.id).unwrap_or(1)),
            content: content.to_string(),
            last_modified: modified_at,
            modified_by: Some(modified_by.to_string()),
        };
        *page = Some(saved.clone());

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_updates_single_page() {
        let repo = InMemoryAboutRepository::new();
        assert!(repo.latest().await.unwrap().is_none());

        repo.save("first", "admin", Utc::now()).await.unwrap();
        repo.save("second", "admin", Utc::now()).await.unwrap();

        let page = repo.latest().await.unwrap().unwrap();
        assert_eq!(page.id, Some(1));
        assert_eq!(page.content, "second");
    }
}
