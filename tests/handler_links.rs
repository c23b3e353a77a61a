mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn create_link(app: &common::TestApp, token: &str, url: &str) -> Value {
    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(token)
        .json(&json!({ "original_url": url }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_success() {
    let app = common::spawn_app().await;

    let body = create_link(&app, &app.alice_token, "example.com/some/page").await;

    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 10);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["short_url"], format!("short.com/{code}"));
    assert_eq!(body["original_url"], "https://example.com/some/page");
    assert_eq!(body["created_by"], common::ALICE);
    assert_eq!(body["redirect_count"], 0);
    assert_eq!(body["version"], 1);
}

#[tokio::test]
async fn test_create_link_keeps_http_scheme() {
    let app = common::spawn_app().await;

    let body = create_link(&app, &app.alice_token, "http://example.com").await;

    assert_eq!(body["original_url"], "http://example.com");
}

#[tokio::test]
async fn test_create_same_url_twice_gets_distinct_codes() {
    let app = common::spawn_app().await;

    let first = create_link(&app, &app.alice_token, "https://example.com").await;
    let second = create_link(&app, &app.alice_token, "https://example.com").await;

    assert_ne!(first["short_code"], second["short_code"]);
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_create_link_requires_token() {
    let app = common::spawn_app().await;

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_create_link_rejects_unknown_token() {
    let app = common::spawn_app().await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer("not-a-real-token")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_link_blank_url() {
    let app = common::spawn_app().await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "Original URL is required");
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let app = common::spawn_app().await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "ht tp://bad url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid URL format");
}

#[tokio::test]
async fn test_create_link_rejects_embedded_newline() {
    let app = common::spawn_app().await;

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "example.com/a\nb" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid URL format");

    let listed = app.server.get("/api/links").await.json::<Value>();
    assert_eq!(listed["total"], 0);
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_link() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    let response = app
        .server
        .get(&format!("/api/links/{}", created["id"]))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["short_code"], created["short_code"]);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let app = common::spawn_app().await;

    app.server
        .get("/api/links/999")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_lookup_link_by_short_url_leaves_count_unchanged() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com/looked-up").await;
    let short_url = created["short_url"].as_str().unwrap();

    let response = app
        .server
        .get("/api/links/lookup")
        .add_query_param("shortUrl", format!("https://{short_url}"))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["original_url"], "https://example.com/looked-up");
    assert_eq!(body["redirect_count"], 0);

    let again = app
        .server
        .get(&format!("/api/links/{}", created["id"]))
        .await
        .json::<Value>();
    assert_eq!(again["redirect_count"], 0);
}

#[tokio::test]
async fn test_lookup_link_errors() {
    let app = common::spawn_app().await;

    app.server
        .get("/api/links/lookup")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .get("/api/links/lookup")
        .add_query_param("shortUrl", "short.com/NoSuchCode")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let app = common::spawn_app().await;
    for i in 0..3 {
        create_link(&app, &app.alice_token, &format!("https://example.com/{i}")).await;
    }

    let response = app.server.get("/api/links").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 25);

    let urls: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["original_url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/2",
            "https://example.com/1",
            "https://example.com/0"
        ]
    );
}

#[tokio::test]
async fn test_list_links_pagination() {
    let app = common::spawn_app().await;
    for i in 0..3 {
        create_link(&app, &app.alice_token, &format!("https://example.com/{i}")).await;
    }

    let response = app
        .server
        .get("/api/links")
        .add_query_param("page", 2)
        .add_query_param("page_size", 2)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["original_url"], "https://example.com/0");
}

#[tokio::test]
async fn test_list_links_rejects_oversized_page() {
    let app = common::spawn_app().await;

    app.server
        .get("/api/links")
        .add_query_param("page_size", 1000)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_link_by_owner() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    let response = app
        .server
        .patch(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "new-destination.com", "version": 1 }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["original_url"], "https://new-destination.com");
    assert_eq!(body["short_code"], created["short_code"]);
    assert_eq!(body["version"], 2);
}

#[tokio::test]
async fn test_update_link_by_admin() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    app.server
        .patch(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.admin_token)
        .json(&json!({ "original_url": "https://admin.example.com", "version": 1 }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_link_by_other_user_is_forbidden() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    let response = app
        .server
        .patch(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.bob_token)
        .json(&json!({ "original_url": "https://evil.example.com", "version": 1 }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    let unchanged = app
        .server
        .get(&format!("/api/links/{}", created["id"]))
        .await
        .json::<Value>();
    assert_eq!(unchanged["original_url"], "https://example.com");
}

#[tokio::test]
async fn test_update_link_stale_version_conflicts() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;
    let path = format!("/api/links/{}", created["id"]);

    app.server
        .patch(&path)
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "https://first.example.com", "version": 1 }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(&app.admin_token)
        .json(&json!({ "original_url": "https://second.example.com", "version": 1 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["details"]["current_version"], 2);
}

#[tokio::test]
async fn test_update_link_rejects_tab_character() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    app.server
        .patch(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.alice_token)
        .json(&json!({ "original_url": "https://example.com/a\tb", "version": 1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let unchanged = app
        .server
        .get(&format!("/api/links/{}", created["id"]))
        .await
        .json::<Value>();
    assert_eq!(unchanged["original_url"], "https://example.com");
    assert_eq!(unchanged["version"], 1);
}

#[tokio::test]
async fn test_update_link_not_found() {
    let app = common::spawn_app().await;

    app.server
        .patch("/api/links/42")
        .authorization_bearer(&app.admin_token)
        .json(&json!({ "original_url": "https://example.com", "version": 1 }))
        .await
        .assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link_by_owner() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;
    let path = format!("/api/links/{}", created["id"]);

    app.server
        .delete(&path)
        .authorization_bearer(&app.alice_token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server.get(&path).await.assert_status_not_found();

    // Second delete returns 404, the link is gone.
    app.server
        .delete(&path)
        .authorization_bearer(&app.alice_token)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_by_admin() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.bob_token, "https://example.com").await;

    app.server
        .delete(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.admin_token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_link_by_other_user_is_forbidden() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    app.server
        .delete(&format!("/api/links/{}", created["id"]))
        .authorization_bearer(&app.bob_token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_link_requires_token() {
    let app = common::spawn_app().await;
    let created = create_link(&app, &app.alice_token, "https://example.com").await;

    app.server
        .delete(&format!("/api/links/{}", created["id"]))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
