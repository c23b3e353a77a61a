//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{Principal, Role};
use crate::domain::repositories::{ApiToken, NewApiToken, TokenRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared by the server and the
/// admin CLI so tokens issued by one are accepted by the other.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating requests via API tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    pub fn hash_token(&self, token: &str) -> String {
        hash_token(&self.signing_secret, token)
    }

    /// Authenticates a raw token and returns the identity it was issued for.
    ///
    /// On success the `last_used_at` timestamp is refreshed; a failure to do so is
    /// logged and does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token is blank
    /// - Token hash does not match any stored credentials
    /// - Token has been revoked
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Missing token"}),
            ));
        }

        let token_hash = self.hash_token(token);

        let Some(stored) = self.repository.find_active(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(token = %stored.name, error = %e, "Failed to update token last_used_at");
        }

        Ok(Principal::from_stored_roles(stored.user_name, &stored.roles))
    }

    /// Stores a new token for `user_name` with the given roles.
    ///
    /// Only the hash of `raw_token` is persisted; the caller is responsible for
    /// handing the raw value to the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name or token is blank.
    /// Returns [`AppError::Conflict`] if the name is already in use.
    pub async fn issue_token(
        &self,
        name: &str,
        raw_token: &str,
        user_name: &str,
        roles: &[Role],
    ) -> Result<ApiToken, AppError> {
        if name.trim().is_empty() || raw_token.trim().is_empty() {
            return Err(AppError::bad_request(
                "Token name and value are required",
                json!({}),
            ));
        }

        let token = self
            .repository
            .create_token(NewApiToken {
                name: name.trim().to_string(),
                token_hash: self.hash_token(raw_token),
                user_name: user_name.trim().to_string(),
                roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            })
            .await?;

        tracing::info!(id = token.id, name = %token.name, user = %token.user_name, "API token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTokenRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn stored_token(user_name: &str, roles: &[&str]) -> ApiToken {
        ApiToken {
            id: 1,
            name: "ci".to_string(),
            token_hash: String::new(),
            user_name: user_name.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);

        mock_repo
            .expect_find_active()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(stored_token("alice@example.com", &["User"]))));

        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let principal = service.authenticate(token).await.unwrap();

        assert_eq!(principal.name(), "alice@example.com");
        assert!(principal.has_role(Role::User));
        assert!(!principal.is_admin());
    }

    #[tokio::test]
    async fn test_authenticate_maps_legacy_admin_role() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo
            .expect_find_active()
            .returning(|_| Ok(Some(stored_token("admin@admin.com", &["Admin"]))));
        mock_repo.expect_update_last_used().returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let principal = service.authenticate("token").await.unwrap();

        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_authenticate_survives_last_used_failure() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo
            .expect_find_active()
            .returning(|_| Ok(Some(stored_token("alice@example.com", &["User"]))));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate("token").await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_active()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update_last_used().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_blank_token() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_find_active().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("  ").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_and_roles() {
        let mut mock_repo = MockTokenRepository::new();
        let expected_hash = hash_token(&test_secret(), "raw-token");

        mock_repo
            .expect_create_token()
            .withf(move |new_token| {
                new_token.token_hash == expected_hash
                    && new_token.user_name == "admin@admin.com"
                    && new_token.roles == vec!["Administrator".to_string()]
            })
            .times(1)
            .returning(|new_token| {
                Ok(ApiToken {
                    id: 7,
                    name: new_token.name,
                    token_hash: new_token.token_hash,
                    user_name: new_token.user_name,
                    roles: new_token.roles,
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let token = service
            .issue_token("ops", "raw-token", "admin@admin.com", &[Role::Administrator])
            .await
            .unwrap();

        assert_eq!(token.id, 7);
    }

    #[test]
    fn test_hash_token_consistency() {
        let service = AuthService::new(Arc::new(MockTokenRepository::new()), test_secret());

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_different_inputs() {
        assert_ne!(
            hash_token(&test_secret(), "token1"),
            hash_token(&test_secret(), "token2")
        );
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
    }
}
