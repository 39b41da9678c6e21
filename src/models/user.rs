//! User roles and the authenticated caller identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ordered role hierarchy for access checks.
///
/// "Require minimum role R" means `R rank <= caller rank`. Admin and above
/// bypass ownership checks on experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pending,
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Parse a role from its stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Get role name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Check whether this role ranks at least as high as `min`.
    pub fn has_at_least(&self, min: Role) -> bool {
        *self >= min
    }

    /// Admin or higher: may act on experiments owned by other users.
    pub fn is_elevated(&self) -> bool {
        self.has_at_least(Role::Admin)
    }
}

/// The authenticated caller resolved from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Pending < Role::User);
        assert!(Role::User < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
    }

    #[test]
    fn test_has_at_least() {
        assert!(Role::Admin.has_at_least(Role::User));
        assert!(Role::User.has_at_least(Role::User));
        assert!(!Role::Pending.has_at_least(Role::User));
        assert!(!Role::Admin.has_at_least(Role::SuperAdmin));
    }

    #[test]
    fn test_is_elevated() {
        assert!(!Role::User.is_elevated());
        assert!(Role::Admin.is_elevated());
        assert!(Role::SuperAdmin.is_elevated());
    }

    #[test]
    fn test_parse_round_trip() {
        for role in [Role::Pending, Role::User, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("viewer"), None);
    }
}
