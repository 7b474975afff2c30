use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, KycStatus};
use crate::query::field::{field_key, FieldValue, Record};

/// A verification tier (e.g. "Basic", "Enhanced") made of ordered detail steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycLevel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ordinal of the tier; users progress through levels in this order.
    pub level: u32,
    #[serde(default)]
    pub status: KycStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Level summary embedded in details, user levels and country assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycLevelRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Entity for KycLevel {
    const PATH: &'static str = "kyc-levels";
    const NAME: &'static str = "kyc level";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for KycLevel {
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "name" => FieldValue::from(&self.name),
            "description" => FieldValue::from(&self.description),
            "level" => FieldValue::from(self.level),
            "status" => FieldValue::from(self.status),
            "isactive" => FieldValue::from(self.is_active),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}

impl Record for KycLevelRef {
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "name" => FieldValue::from(&self.name),
            "level" => FieldValue::from(self.level),
            _ => return None,
        })
    }
}

impl From<&KycLevel> for KycLevelRef {
    fn from(level: &KycLevel) -> Self {
        Self {
            id: level.id.clone(),
            name: level.name.clone(),
            level: Some(level.level),
        }
    }
}
