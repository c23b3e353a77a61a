//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

const LINK_COLUMNS: &str =
    "id, original_url, short_code, created_by, created_date, redirect_count, version";

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_by: String,
    created_date: DateTime<Utc>,
    redirect_count: i64,
    version: i64,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            created_by: row.created_by,
            created_date: row.created_date,
            redirect_count: row.redirect_count,
            version: row.version,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// `short_code` uniqueness is enforced by the `short_links_short_code_key` constraint;
/// redirect counting and versioned edits are single atomic `UPDATE` statements.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let sql = format!(
            r#"
            INSERT INTO short_links (original_url, short_code, created_by, created_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(&new_link.created_by)
            .bind(new_link.created_date)
            .fetch_one(self.pool.as_ref())
            .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db| is_unique_violation_on_code(db)) =>
            {
                Err(AppError::CodeTaken {
                    code: new_link.short_code,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE id = $1");

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM short_links WHERE short_code = $1");

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM short_links WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<Vec<ShortLink>, AppError> {
        let offset = (page - 1) * page_size;
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_links
            ORDER BY created_date DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(page_size)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update_original_url(
        &self,
        id: i64,
        original_url: &str,
        expected_version: i64,
    ) -> Result<Option<ShortLink>, AppError> {
        let sql = format!(
            r#"
            UPDATE short_links
            SET original_url = $2, version = version + 1
            WHERE id = $1 AND version = $3
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(id)
            .bind(original_url)
            .bind(expected_version)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn record_redirect(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let sql = format!(
            r#"
            UPDATE short_links
            SET redirect_count = redirect_count + 1
            WHERE short_code = $1
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ShortLinkRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
