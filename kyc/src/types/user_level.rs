use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, KycDetailRef, KycLevelRef, KycStatus, UserRef};
use crate::query::field::{field_key, nested, FieldValue, Record};

/// A user's submission for one KYC level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKycLevel {
    pub id: String,
    pub user_id: String,
    pub level_id: String,
    #[serde(default)]
    pub status: KycStatus,
    /// Reviewer comments; required when a submission is rejected.
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub level: Option<KycLevelRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// A user's answer to one KYC detail step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKycDetail {
    pub id: String,
    pub user_id: String,
    pub detail_id: String,
    #[serde(default)]
    pub user_kyc_level_id: Option<String>,
    /// Submitted value (text answer or document reference).
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub status: KycStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub detail: Option<KycDetailRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Entity for UserKycLevel {
    const PATH: &'static str = "user-kyc-levels";
    const NAME: &'static str = "user kyc level";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for UserKycDetail {
    const PATH: &'static str = "user-kyc-details";
    const NAME: &'static str = "user kyc detail";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for UserKycLevel {
    const SEARCH_FIELDS: &'static [&'static str] =
        &["user.email", "user.fullName", "level.name", "comments"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some((head, rest)) = name.split_once('.') {
            return match field_key(head).as_str() {
                "user" => nested(self.user.as_ref(), rest),
                "level" => nested(self.level.as_ref(), rest),
                _ => None,
            };
        }
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "userid" => FieldValue::from(&self.user_id),
            "levelid" => FieldValue::from(&self.level_id),
            "status" => FieldValue::from(self.status),
            "comments" => FieldValue::from(self.comments.as_ref()),
            "submittedat" => FieldValue::from(self.submitted_at),
            "reviewedat" => FieldValue::from(self.reviewed_at),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}

impl Record for UserKycDetail {
    const SEARCH_FIELDS: &'static [&'static str] = &["value", "detail.name", "comments"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some((head, rest)) = name.split_once('.') {
            return match field_key(head).as_str() {
                "detail" => nested(self.detail.as_ref(), rest),
                _ => None,
            };
        }
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "userid" => FieldValue::from(&self.user_id),
            "detailid" => FieldValue::from(&self.detail_id),
            "userkyclevelid" => FieldValue::from(self.user_kyc_level_id.as_ref()),
            "value" => FieldValue::from(self.value.as_ref()),
            "status" => FieldValue::from(self.status),
            "comments" => FieldValue::from(self.comments.as_ref()),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}
