//! PostgreSQL implementation of about page repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::AboutPage;
use crate::domain::repositories::AboutRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AboutPageRow {
    id: i64,
    content: String,
    last_modified: DateTime<Utc>,
    modified_by: Option<String>,
}

impl From<AboutPageRow> for AboutPage {
    fn from(row: AboutPageRow) -> Self {
        AboutPage {
            id: Some(row.id),
            content: row.content,
            last_modified: row.last_modified,
            modified_by: row.modified_by,
        }
    }
}

/// PostgreSQL repository for the about page.
///
/// The table may hold several rows; the most recently modified one is the page.
pub struct PgAboutRepository {
    pool: Arc<PgPool>,
}

impl PgAboutRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AboutRepository for PgAboutRepository {
    async fn latest(&self) -> Result<Option<AboutPage>, AppError> {
        let row = sqlx::query_as::<_, AboutPageRow>(
            r#"
            SELECT id, content, last_modified, modified_by
            FROM about_pages
            ORDER BY last_modified DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save(
        &self,
        content: &str,
        modified_by: &str,
        modified_at: DateTime<Utc>,
    ) -> Result<AboutPage, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent edits of the same page.
        let current: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM about_pages
            ORDER BY last_modified DESC, id DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;

        let row = match current {
            Some(id) => {
                sqlx::query_as::<_, AboutPageRow>(
                    r#"
                    UPDATE about_pages
                    SET content = $2, last_modified = $3, modified_by = $4
                    WHERE id = $1
                    RETURNING id, content, last_modified, modified_by
                    "#,
                )
                .bind(id)
                .bind(content)
                .bind(modified_at)
                .bind(modified_by)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, AboutPageRow>(
                    r#"
                    INSERT INTO about_pages (content, last_modified, modified_by)
                    VALUES ($1, $2, $3)
                    RETURNING id, content, last_modified, modified_by
                    "#,
                )
                .bind(content)
                .bind(modified_at)
                .bind(modified_by)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(row.into())
    }
}
