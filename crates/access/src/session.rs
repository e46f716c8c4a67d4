//! The persisted admin session record.

use serde::{Deserialize, Serialize};

use opi_core::Email;

/// Storage key under which the admin session record is persisted.
///
/// The same key is used in both scopes so either can satisfy a read.
pub const SESSION_KEY: &str = "opi_admin_session";

/// A locally-authenticated admin session.
///
/// Exists if and only if a successful PIN login created it and no logout
/// has cleared it since. Issued via PIN by construction - there is no
/// other way to obtain one.
///
/// Wire format (both storage scopes): `{"email": "<string>"}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminSession {
    /// Email the admin authenticated with.
    pub email: Email,
}

impl AdminSession {
    /// Create a session record for a verified admin email.
    #[must_use]
    pub const fn new(email: Email) -> Self {
        Self { email }
    }

    /// Parse a session record from its persisted JSON form.
    ///
    /// Returns `None` for corrupt JSON, a missing field, or an empty or
    /// malformed email - a stored record only counts if it would have
    /// been valid to create in the first place.
    #[must_use]
    pub fn from_stored(payload: &str) -> Option<Self> {
        // Deserialize through a raw record so the email is re-validated;
        // Email's serde impl is transparent and would accept "".
        let raw: RawRecord = serde_json::from_str(payload).ok()?;
        let email = Email::parse(&raw.email).ok()?;
        Some(Self { email })
    }
}

/// Unvalidated form of the stored record.
#[derive(Deserialize)]
struct RawRecord {
    email: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let session = AdminSession::new(Email::parse("owner@example.com").unwrap());
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"email":"owner@example.com"}"#);

        let parsed = AdminSession::from_stored(&json).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_from_stored_corrupt_json() {
        assert!(AdminSession::from_stored("not json at all {").is_none());
    }

    #[test]
    fn test_from_stored_missing_field() {
        assert!(AdminSession::from_stored("{}").is_none());
    }

    #[test]
    fn test_from_stored_empty_email() {
        assert!(AdminSession::from_stored(r#"{"email":""}"#).is_none());
    }

    #[test]
    fn test_from_stored_invalid_email() {
        assert!(AdminSession::from_stored(r#"{"email":"no-at-symbol"}"#).is_none());
    }
}
