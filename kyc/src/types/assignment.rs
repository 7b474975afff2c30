use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, KycLevelRef, KycStatus};
use crate::query::field::{field_key, nested, FieldValue, Record};

/// Required KYC level for users registering from a given country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryKycAssignment {
    pub id: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    pub level_id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub status: KycStatus,
    #[serde(default)]
    pub level: Option<KycLevelRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Entity for CountryKycAssignment {
    const PATH: &'static str = "country-kyc-assignments";
    const NAME: &'static str = "country assignment";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for CountryKycAssignment {
    const SEARCH_FIELDS: &'static [&'static str] = &["countryCode", "countryName", "level.name"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some((head, rest)) = name.split_once('.') {
            return match field_key(head).as_str() {
                "level" => nested(self.level.as_ref(), rest),
                _ => None,
            };
        }
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "countrycode" => FieldValue::from(&self.country_code),
            "countryname" => FieldValue::from(&self.country_name),
            "levelid" => FieldValue::from(&self.level_id),
            "isactive" => FieldValue::from(self.is_active),
            "status" => FieldValue::from(self.status),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}
