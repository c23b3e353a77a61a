//! Authenticated caller identity and roles.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Name reported for callers without a usable identity.
pub const UNKNOWN_USER: &str = "Unknown";

/// Roles recognised by authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Administrator,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string is not recognised.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Parses stored role names, case-insensitively.
    ///
    /// Historical data uses both `Administrator` and `Admin`; both map to
    /// [`Role::Administrator`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "user" => Ok(Role::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: String,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            name: name.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Builds a principal from stored role strings, dropping unrecognised ones.
    pub fn from_stored_roles<S: AsRef<str>>(name: impl Into<String>, roles: &[S]) -> Self {
        let name = name.into();
        let roles = roles
            .iter()
            .filter_map(|raw| match raw.as_ref().parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(user = %name, "Ignoring {}", e);
                    None
                }
            })
            .collect::<Vec<_>>();

        Self::new(name, roles)
    }

    /// User name, or `"Unknown"` when blank.
    pub fn name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNKNOWN_USER
        } else {
            &self.name
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Administrator)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_canonical_names() {
        assert_eq!("Administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn test_role_maps_legacy_admin_name() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Administrator);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("Superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_principal_drops_unknown_roles() {
        let principal = Principal::from_stored_roles("alice", &["Admin", "Superuser"]);

        assert!(principal.is_admin());
        assert_eq!(principal.roles().count(), 1);
    }

    #[test]
    fn test_blank_name_reports_unknown() {
        let principal = Principal::new("  ", [Role::User]);
        assert_eq!(principal.name(), UNKNOWN_USER);
    }

    #[test]
    fn test_has_role() {
        let principal = Principal::new("bob", [Role::User]);

        assert!(principal.has_role(Role::User));
        assert!(!principal.is_admin());
    }
}
