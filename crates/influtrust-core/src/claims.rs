//! Records persisted in the influencer/claim registry service.
//!
//! The registry speaks camelCase JSON with Mongo-style `_id` keys; these
//! types mirror that shape so the client can pass them straight through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verification outcome for a health claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Verified,
    Questionable,
    Debunked,
    #[default]
    #[serde(other)]
    Unverified,
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimStatus::Verified => write!(f, "verified"),
            ClaimStatus::Questionable => write!(f, "questionable"),
            ClaimStatus::Debunked => write!(f, "debunked"),
            ClaimStatus::Unverified => write!(f, "unverified"),
        }
    }
}

/// A health assertion attributed to an influencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(rename = "_id")]
    pub id: String,
    pub influencer_id: String,
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ClaimStatus,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for creating or replacing a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDraft {
    pub influencer_id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Platform handles stored for a registry influencer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryHandles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryInfluencer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub handles: RegistryHandles,
    #[serde(default)]
    pub trust_score: Option<u8>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryInfluencerDraft {
    pub name: String,
    #[serde(default)]
    pub handles: RegistryHandles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<u8>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_parses_registry_shape() {
        let json = r#"{
            "_id": "65f0c1",
            "influencerId": "65e9aa",
            "text": "Vitamin D prevents colds",
            "status": "questionable",
            "sourceUrl": "https://example.com/post/1",
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.id, "65f0c1");
        assert_eq!(claim.influencer_id, "65e9aa");
        assert_eq!(claim.status, ClaimStatus::Questionable);
        assert!(claim.category.is_none());
        assert!(claim.created_at.is_some());
    }

    #[test]
    fn unknown_claim_status_is_unverified() {
        let status: ClaimStatus = serde_json::from_str("\"pending-review\"").unwrap();
        assert_eq!(status, ClaimStatus::Unverified);
    }

    #[test]
    fn draft_omits_empty_optionals() {
        let draft = ClaimDraft {
            influencer_id: "abc".to_string(),
            text: "Sleep matters".to_string(),
            category: None,
            status: ClaimStatus::Verified,
            source_url: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["influencerId"], "abc");
        assert_eq!(value["status"], "verified");
        assert!(value.get("sourceUrl").is_none());
    }

    #[test]
    fn registry_influencer_defaults_missing_fields() {
        let json = r#"{"_id": "1", "name": "Dr. Rui"}"#;
        let influencer: RegistryInfluencer = serde_json::from_str(json).unwrap();
        assert_eq!(influencer.handles, RegistryHandles::default());
        assert!(influencer.trust_score.is_none());
        assert!(influencer.categories.is_empty());
    }
}
