use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, KycLevelRef, KycStatus};
use crate::query::field::{field_key, nested, FieldValue, Record};
use crate::reorder::Sequenced;

/// A single step of a KYC level (document upload, address, selfie, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDetail {
    pub id: String,
    pub level_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub is_required: bool,
    /// 1-based position of the step within its level.
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub status: KycStatus,
    #[serde(default)]
    pub level: Option<KycLevelRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Detail summary embedded in user detail records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDetailRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field_type: String,
}

impl Entity for KycDetail {
    const PATH: &'static str = "kyc-details";
    const NAME: &'static str = "kyc detail";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for KycDetail {
    const SEARCH_FIELDS: &'static [&'static str] =
        &["name", "description", "fieldType", "level.name"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some((head, rest)) = name.split_once('.') {
            return match field_key(head).as_str() {
                "level" => nested(self.level.as_ref(), rest),
                _ => None,
            };
        }
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "levelid" => FieldValue::from(&self.level_id),
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "fieldtype" => FieldValue::from(&self.field_type),
            "isrequired" => FieldValue::from(self.is_required),
            "sequence" => FieldValue::from(self.sequence),
            "status" => FieldValue::from(self.status),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}

impl Record for KycDetailRef {
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "name" => FieldValue::from(&self.name),
            "fieldtype" => FieldValue::from(&self.field_type),
            _ => return None,
        })
    }
}

impl Sequenced for KycDetail {
    fn key(&self) -> &str {
        &self.id
    }

    fn sequence_mut(&mut self) -> Option<&mut u32> {
        self.sequence.as_mut()
    }
}
