//! Authorization roles returned by the remote identity service.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The caller's authorization role as known by the remote service.
///
/// Three-valued by contract: `admin`, `user`, `guest`. A caller with no
/// recorded role is a guest, which is why `Guest` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// A registered, non-admin user.
    User,
    /// An unregistered or unknown caller.
    #[default]
    Guest,
}

impl UserRole {
    /// Whether this role grants administrative access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<UserRole>("\"guest\"").unwrap(),
            UserRole::Guest
        );
    }

    #[test]
    fn test_default_is_guest() {
        assert_eq!(UserRole::default(), UserRole::Guest);
    }

    #[test]
    fn test_is_admin() {
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
        assert!(!UserRole::Guest.is_admin());
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::User.to_string(), "user");
    }
}
