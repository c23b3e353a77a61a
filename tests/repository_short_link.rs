mod common;

use link_shortener::domain::entities::NewShortLink;
use link_shortener::domain::repositories::ShortLinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewShortLink {
    NewShortLink {
        original_url: url.to_string(),
        short_code: code.to_string(),
        created_by: common::ALICE.to_string(),
        created_date: common::fixed_time(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("Abc123XyZ0", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.redirect_count, 0);
    assert_eq!(link.version, 1);
    assert!(repo.exists_by_code("Abc123XyZ0").await.unwrap());
    assert!(!repo.exists_by_code("abc123xyz0").await.unwrap());

    let found = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_code_is_code_taken(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dupcode001", "https://a.example.com"))
        .await
        .unwrap();

    let result = repo
        .create(new_link("dupcode001", "https://b.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::CodeTaken { .. })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_record_redirect_increments(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    repo.create(new_link("redir00001", "https://example.com"))
        .await
        .unwrap();

    repo.record_redirect("redir00001").await.unwrap();
    let link = repo.record_redirect("redir00001").await.unwrap().unwrap();

    assert_eq!(link.redirect_count, 2);
    assert!(repo.record_redirect("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_original_url_checks_version(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    let link = repo
        .create(new_link("edit000001", "https://example.com"))
        .await
        .unwrap();

    let updated = repo
        .update_original_url(link.id, "https://rust-lang.org", 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.short_code, "edit000001");

    let stale = repo
        .update_original_url(link.id, "https://stale.example.com", 1)
        .await
        .unwrap();
    assert!(stale.is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    for i in 0..3 {
        repo.create(new_link(&format!("list00000{i}"), "https://example.com"))
            .await
            .unwrap();
    }

    let page = repo.list(1, 2).await.unwrap();
    let codes: Vec<_> = page.iter().map(|l| l.short_code.as_str()).collect();

    assert_eq!(codes, vec!["list000002", "list000001"]);
    assert_eq!(repo.list(2, 2).await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    let link = repo
        .create(new_link("delete0001", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete(link.id).await.unwrap());
    assert!(!repo.delete(link.id).await.unwrap());
    assert!(repo.find_by_code("delete0001").await.unwrap().is_none());
}
