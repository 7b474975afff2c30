use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, KycStatus};
use crate::query::field::{field_key, FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: KycStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// User summary embedded in user KYC level records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl UserRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for User {
    const PATH: &'static str = "users";
    const NAME: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const SEARCH_FIELDS: &'static [&'static str] =
        &["email", "firstName", "lastName", "fullName", "country"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "email" => FieldValue::from(&self.email),
            "firstname" => FieldValue::from(&self.first_name),
            "lastname" => FieldValue::from(&self.last_name),
            "fullname" | "name" => FieldValue::Text(self.full_name()),
            "country" => FieldValue::from(&self.country),
            "role" => FieldValue::Text(self.role.to_string()),
            "status" => FieldValue::from(self.status),
            "createdat" => FieldValue::from(self.created_at),
            "lastupdated" => FieldValue::from(self.last_updated),
            _ => return None,
        })
    }
}

impl Record for UserRef {
    const SEARCH_FIELDS: &'static [&'static str] = &["email", "fullName"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match field_key(name).as_str() {
            "id" => FieldValue::from(&self.id),
            "email" => FieldValue::from(&self.email),
            "firstname" => FieldValue::from(&self.first_name),
            "lastname" => FieldValue::from(&self.last_name),
            "fullname" | "name" => FieldValue::Text(self.full_name()),
            _ => return None,
        })
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
