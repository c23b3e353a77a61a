#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use link_shortener::domain::entities::Role;
use link_shortener::routes::build_router;
use link_shortener::state::{AppState, Repositories, ServiceSettings};
use link_shortener::utils::clock::FixedClock;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const ADMIN: &str = "admin@admin.com";
pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        display_prefix: "short.com/".to_string(),
        short_url_max_length: 20,
        token_signing_secret: TEST_SECRET.to_string(),
    }
}

/// In-memory state with a frozen clock.
pub fn create_test_state() -> AppState {
    AppState::new(
        Repositories::in_memory(),
        test_settings(),
        Arc::new(FixedClock(fixed_time())),
    )
}

/// Issues a token for `user_name` and returns the raw value.
pub async fn issue_token(state: &AppState, user_name: &str, roles: &[Role]) -> String {
    let raw = format!("token-for-{user_name}");
    state
        .auth_service
        .issue_token(user_name, &raw, user_name, roles)
        .await
        .unwrap();
    raw
}

/// Test server over the full router, without per-IP rate limiting.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, false)).unwrap()
}

/// State, server and tokens for an administrator, Alice and Bob.
pub struct TestApp {
    pub state: AppState,
    pub server: TestServer,
    pub admin_token: String,
    pub alice_token: String,
    pub bob_token: String,
}

pub async fn spawn_app() -> TestApp {
    let state = create_test_state();
    let admin_token = issue_token(&state, ADMIN, &[Role::Administrator]).await;
    let alice_token = issue_token(&state, ALICE, &[Role::User]).await;
    let bob_token = issue_token(&state, BOB, &[Role::User]).await;

    TestApp {
        server: make_server(state.clone()),
        state,
        admin_token,
        alice_token,
        bob_token,
    }
}
