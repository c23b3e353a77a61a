mod common;

use chrono::Duration;
use link_shortener::domain::repositories::AboutRepository;
use link_shortener::infrastructure::persistence::PgAboutRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_latest_is_none_when_empty(pool: PgPool) {
    let repo = PgAboutRepository::new(Arc::new(pool));

    assert!(repo.latest().await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_save_updates_in_place(pool: PgPool) {
    let repo = PgAboutRepository::new(Arc::new(pool.clone()));

    let first = repo
        .save("first", common::ADMIN, common::fixed_time())
        .await
        .unwrap();
    let second = repo
        .save("second", common::ADMIN, common::fixed_time() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);

    let latest = repo.latest().await.unwrap().unwrap();
    assert_eq!(latest.content, "second");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM about_pages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}
