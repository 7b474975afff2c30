//! Typed field access shared by search, filtering and sorting.
//!
//! Every entity exposes its sortable/filterable fields through [`Record`]
//! instead of being indexed dynamically. Field names are matched after
//! [`field_key`] normalisation, so `lastUpdated`, `last_updated` and
//! `LastUpdated` address the same field.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ordered_float::OrderedFloat;
use serde_json::Value;

use crate::types::KycStatus;

/// A comparable value extracted from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    Timestamp(DateTime<Utc>),
    Status(KycStatus),
    Text(String),
}

/// Read access to the named fields of an entity.
pub trait Record {
    /// Fields matched by the free-text `search` parameter.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Look up a field by name. Dotted names reach into embedded records.
    /// `None` means the record has no such field; a known field without a
    /// value is `Some(FieldValue::Null)`.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Whether any search field contains `term`, ignoring case.
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        Self::SEARCH_FIELDS.iter().any(|name| {
            self.field(name)
                .and_then(|v| v.as_text())
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }
}

/// Normalise a field name for matching: drop `_`/`-`, lowercase the rest.
pub fn field_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve `rest` against an optional embedded record.
pub fn nested<R: Record>(record: Option<&R>, rest: &str) -> Option<FieldValue> {
    match record {
        Some(r) => r.field(rest),
        None => Some(FieldValue::Null),
    }
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Timestamp(_) => 3,
            FieldValue::Status(_) => 4,
            FieldValue::Text(_) => 5,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form used by search and the string operators.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(n.0.to_string()),
            FieldValue::Timestamp(t) => Some(t.to_rfc3339()),
            FieldValue::Status(s) => Some(s.as_str().to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }

    /// Interpret a raw JSON value without a type hint.
    pub fn from_json(value: &Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map_or(FieldValue::Null, |f| FieldValue::Number(OrderedFloat(f))),
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Convert a JSON filter value into the same kind as `self`, so that a
    /// status field compares against a normalised status, a date field
    /// against a parsed timestamp, and so on. Returns `None` if the value
    /// cannot be read as that kind.
    pub fn coerce(&self, value: &Value) -> Option<FieldValue> {
        match self {
            FieldValue::Status(_) => KycStatus::from_json(value).map(FieldValue::Status),
            FieldValue::Number(_) => match value {
                Value::Number(n) => n.as_f64().map(|f| FieldValue::Number(OrderedFloat(f))),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .map(|f| FieldValue::Number(OrderedFloat(f))),
                _ => None,
            },
            FieldValue::Timestamp(_) => match value {
                Value::String(s) => parse_timestamp(s).map(FieldValue::Timestamp),
                Value::Number(n) => n
                    .as_i64()
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                    .map(FieldValue::Timestamp),
                _ => None,
            },
            FieldValue::Bool(_) => match value {
                Value::Bool(b) => Some(FieldValue::Bool(*b)),
                Value::String(s) => s.trim().parse::<bool>().ok().map(FieldValue::Bool),
                _ => None,
            },
            FieldValue::Text(_) => match value {
                Value::Null => Some(FieldValue::Null),
                Value::String(s) => Some(FieldValue::Text(s.clone())),
                Value::Number(n) => Some(FieldValue::Text(n.to_string())),
                Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
                _ => None,
            },
            FieldValue::Null => Some(FieldValue::from_json(value)),
        }
    }
}

/// Parse RFC 3339 timestamps, or plain `YYYY-MM-DD` dates as UTC midnight.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Status(a), FieldValue::Status(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl FieldValue {
    /// Ordering used by list sorting. Text differing only in case compares
    /// equal, so a stable sort keeps such records in input order.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => self.cmp(other),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(OrderedFloat(f64::from(n)))
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl From<KycStatus> for FieldValue {
    fn from(s: KycStatus) -> Self {
        FieldValue::Status(s)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
