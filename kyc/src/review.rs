//! Administrator review of user submissions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{KycError, Result};
use crate::types::KycStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve { comments: Option<String> },
    Reject { comments: String },
}

/// Partial update sent with `PUT /user-kyc-levels/{id}` (or details).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub status: KycStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewDecision {
    /// Build a decision from a CLI/console verb (`approve` or `reject`).
    pub fn parse(verb: &str, comments: Option<String>) -> Result<Self> {
        let comments = comments.filter(|c| !c.trim().is_empty());
        match verb.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" => Ok(ReviewDecision::Approve { comments }),
            "reject" | "rejected" => Ok(ReviewDecision::Reject {
                comments: comments.unwrap_or_default(),
            }),
            other => Err(KycError::Validation(format!(
                "unknown review decision {other:?}, expected approve or reject"
            ))),
        }
    }

    /// A rejection must explain itself. Checked before any request is made.
    pub fn validate(&self) -> Result<()> {
        match self {
            ReviewDecision::Reject { comments } if comments.trim().is_empty() => Err(
                KycError::Validation("comments are required when rejecting a submission".into()),
            ),
            _ => Ok(()),
        }
    }

    pub fn status(&self) -> KycStatus {
        match self {
            ReviewDecision::Approve { .. } => KycStatus::Approved,
            ReviewDecision::Reject { .. } => KycStatus::Rejected,
        }
    }

    pub fn to_update(&self, reviewed_at: DateTime<Utc>) -> Result<ReviewUpdate> {
        self.validate()?;
        let comments = match self {
            ReviewDecision::Approve { comments } => comments.clone(),
            ReviewDecision::Reject { comments } => Some(comments.trim().to_string()),
        };
        Ok(ReviewUpdate {
            status: self.status(),
            comments,
            reviewed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_without_comments_is_invalid() {
        let decision = ReviewDecision::parse("reject", Some("   ".into())).unwrap();
        assert!(matches!(decision.validate(), Err(KycError::Validation(_))));
        assert!(decision.to_update(Utc::now()).is_err());
    }

    #[test]
    fn test_reject_with_comments() {
        let decision = ReviewDecision::parse("Reject", Some(" blurry photo ".into())).unwrap();
        let update = decision.to_update(Utc::now()).unwrap();
        assert_eq!(update.status, KycStatus::Rejected);
        assert_eq!(update.comments.as_deref(), Some("blurry photo"));
    }

    #[test]
    fn test_approve_without_comments_omits_field() {
        let update = ReviewDecision::parse("approve", None)
            .unwrap()
            .to_update(Utc::now())
            .unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "Approved");
        assert!(json.get("comments").is_none());
        assert!(json.get("reviewedAt").is_some());
    }

    #[test]
    fn test_unknown_verb() {
        assert!(ReviewDecision::parse("maybe", None).is_err());
    }
}
