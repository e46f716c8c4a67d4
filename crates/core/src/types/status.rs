//! Status enums for case tracking.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted case.
///
/// Status changes are recorded by the remote service as an audit trail
/// (`CaseStatusChange`), so the variants here must match the service's
/// snake_case wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Freshly submitted, not yet triaged.
    #[default]
    New,
    /// An investigator is actively working the case.
    UnderReview,
    /// The team reached a conclusion.
    Resolved,
    /// Closed without resolution (duplicate, withdrawn, hoax).
    Closed,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::UnderReview => "under_review",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&CaseStatus::UnderReview).unwrap(),
            "\"under_review\""
        );
        assert_eq!(
            serde_json::from_str::<CaseStatus>("\"resolved\"").unwrap(),
            CaseStatus::Resolved
        );
    }

    #[test]
    fn test_default_is_new() {
        assert_eq!(CaseStatus::default(), CaseStatus::New);
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(CaseStatus::UnderReview.to_string(), "under_review");
    }
}
