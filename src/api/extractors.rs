//! Request extractors shared by API and web handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde_json::json;

use crate::domain::entities::principal::UNKNOWN_USER;
use crate::domain::entities::{Principal, Role};
use crate::error::AppError;

/// The caller, as established by the authentication middleware.
///
/// Anonymous requests carry `None`; extraction itself never fails.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Principal>);

impl CurrentUser {
    /// Caller name, or `"Unknown"` when anonymous.
    pub fn name(&self) -> &str {
        self.0.as_ref().map_or(UNKNOWN_USER, Principal::name)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.as_ref().is_some_and(|p| p.has_role(role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the principal or an `Unauthorized` error.
    pub fn require(&self) -> Result<&Principal, AppError> {
        self.0.as_ref().ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({"reason": "Authentication required"}))
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<Principal>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_user_is_unknown() {
        let user = CurrentUser(None);

        assert_eq!(user.name(), "Unknown");
        assert!(!user.has_role(Role::User));
        assert!(matches!(user.require(), Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_authenticated_user_exposes_roles() {
        let user = CurrentUser(Some(Principal::new("admin@admin.com", [Role::Administrator])));

        assert_eq!(user.name(), "admin@admin.com");
        assert!(user.has_role(Role::Administrator));
        assert!(user.require().is_ok());
    }
}
