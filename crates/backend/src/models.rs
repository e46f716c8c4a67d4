//! Wire models for the remote service.
//!
//! Field names follow the service's camelCase JSON convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opi_core::{CaseId, CaseStatus, Email};

/// A submitted paranormal case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Service-assigned case ID.
    pub id: CaseId,
    /// Email of the person who submitted the case.
    pub owner_email: Email,
    /// Where the phenomena occurred.
    pub location: String,
    /// Category of phenomena (apparition, poltergeist, ...).
    pub phenomena_type: String,
    /// Free-text description from the submitter.
    pub description: String,
    /// How to reach the submitter.
    pub contact_info: String,
    /// URL of an uploaded photo, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Whether an admin marked the case resolved.
    pub resolved: bool,
    /// When the case was submitted.
    pub timestamp: DateTime<Utc>,
}

/// Payload for submitting a new case.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    pub location: String,
    pub phenomena_type: String,
    pub description: String,
    pub contact_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub owner_email: Email,
}

/// Condensed case view returned by the per-user lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummary {
    pub case_id: CaseId,
    pub status: CaseStatus,
    pub location: String,
    pub phenomena_type: String,
}

/// Result of looking up cases by submitter email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseLookupResult {
    pub has_case: bool,
    pub case_summaries: Vec<CaseSummary>,
}

/// One entry in a case's status audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStatusChange {
    pub case_id: CaseId,
    pub from_status: CaseStatus,
    pub to_status: CaseStatus,
    /// Email of the admin who made the change.
    pub changed_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of an admin case mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminCaseResult {
    pub success: bool,
    pub message: String,
}

/// A public-site investigation entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: String,
    pub date: DateTime<Utc>,
}

/// A public-site testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

/// A team member profile shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
}

/// Profile stored for a remote-identity user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: Email,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_case_wire_format_is_camel_case() {
        let case = Case {
            id: CaseId::new("case-1"),
            owner_email: Email::parse("owner@example.com").unwrap(),
            location: "Old Mill Road".to_owned(),
            phenomena_type: "apparition".to_owned(),
            description: "figure on the landing".to_owned(),
            contact_info: "evenings only".to_owned(),
            photo_url: None,
            resolved: false,
            timestamp: "2025-10-31T22:15:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&case).unwrap();
        assert!(json.contains("\"ownerEmail\""));
        assert!(json.contains("\"phenomenaType\""));
        assert!(!json.contains("photo_url"));

        let parsed: Case = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, case);
    }

    #[test]
    fn test_case_missing_photo_deserializes() {
        let json = r#"{
            "id": "case-2",
            "ownerEmail": "owner@example.com",
            "location": "Cemetery Hill",
            "phenomenaType": "orbs",
            "description": "lights over the graves",
            "contactInfo": "mornings",
            "resolved": true,
            "timestamp": "2025-09-01T03:00:00Z"
        }"#;

        let parsed: Case = serde_json::from_str(json).unwrap();
        assert!(parsed.photo_url.is_none());
        assert!(parsed.resolved);
    }

    #[test]
    fn test_lookup_result_round_trip() {
        let json = r#"{
            "hasCase": true,
            "caseSummaries": [
                {
                    "caseId": "case-1",
                    "status": "under_review",
                    "location": "Old Mill Road",
                    "phenomenaType": "apparition"
                }
            ]
        }"#;

        let parsed: CaseLookupResult = serde_json::from_str(json).unwrap();
        assert!(parsed.has_case);
        assert_eq!(parsed.case_summaries.len(), 1);
        assert_eq!(
            parsed.case_summaries.first().unwrap().status,
            CaseStatus::UnderReview
        );
    }
}
