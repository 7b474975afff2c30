use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Verification status shared by every KYC entity.
///
/// The backend emits either the PascalCase name or a legacy numeric code
/// (0..=5). Both forms deserialize into this enum; it always serializes as the
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    InProgress,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

/// Badge colour for a status, mirroring the chip palette of the web console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Default,
    Info,
    Primary,
    Warning,
    Success,
    Error,
}

impl KycStatus {
    pub const ALL: [KycStatus; 6] = [
        KycStatus::NotSubmitted,
        KycStatus::InProgress,
        KycStatus::Submitted,
        KycStatus::UnderReview,
        KycStatus::Approved,
        KycStatus::Rejected,
    ];

    /// Map a legacy numeric code. Unknown codes fall back to `NotSubmitted`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => KycStatus::NotSubmitted,
            1 => KycStatus::InProgress,
            2 => KycStatus::Submitted,
            3 => KycStatus::UnderReview,
            4 => KycStatus::Approved,
            5 => KycStatus::Rejected,
            other => {
                warn!(code = other, "unknown kyc status code, defaulting to NotSubmitted");
                KycStatus::NotSubmitted
            }
        }
    }

    pub fn code(self) -> i64 {
        match self {
            KycStatus::NotSubmitted => 0,
            KycStatus::InProgress => 1,
            KycStatus::Submitted => 2,
            KycStatus::UnderReview => 3,
            KycStatus::Approved => 4,
            KycStatus::Rejected => 5,
        }
    }

    /// Normalize a raw JSON status value (name or numeric code).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::from_code),
            serde_json::Value::String(s) => Some(Self::from_name(s)),
            _ => None,
        }
    }

    /// Lenient name lookup. Accepts `UnderReview`, `under_review`,
    /// `Under Review`, numeric strings, and any casing; anything else is
    /// `NotSubmitted`.
    pub fn from_name(raw: &str) -> Self {
        match raw.parse() {
            Ok(status) => status,
            Err(_) => {
                warn!(status = raw, "unknown kyc status, defaulting to NotSubmitted");
                KycStatus::NotSubmitted
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KycStatus::NotSubmitted => "NotSubmitted",
            KycStatus::InProgress => "InProgress",
            KycStatus::Submitted => "Submitted",
            KycStatus::UnderReview => "UnderReview",
            KycStatus::Approved => "Approved",
            KycStatus::Rejected => "Rejected",
        }
    }

    /// Human-readable label for tables and badges.
    pub fn label(self) -> &'static str {
        match self {
            KycStatus::NotSubmitted => "Not Submitted",
            KycStatus::InProgress => "In Progress",
            KycStatus::Submitted => "Submitted",
            KycStatus::UnderReview => "Under Review",
            KycStatus::Approved => "Approved",
            KycStatus::Rejected => "Rejected",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            KycStatus::NotSubmitted => StatusColor::Default,
            KycStatus::InProgress => StatusColor::Info,
            KycStatus::Submitted => StatusColor::Primary,
            KycStatus::UnderReview => StatusColor::Warning,
            KycStatus::Approved => StatusColor::Success,
            KycStatus::Rejected => StatusColor::Error,
        }
    }

    /// Whether an administrator can still approve or reject this submission.
    pub fn is_reviewable(self) -> bool {
        matches!(self, KycStatus::Submitted | KycStatus::UnderReview)
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Ok(Self::from_code(code));
        }
        let key: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "notsubmitted" => Ok(KycStatus::NotSubmitted),
            "inprogress" => Ok(KycStatus::InProgress),
            "submitted" => Ok(KycStatus::Submitted),
            "underreview" => Ok(KycStatus::UnderReview),
            "approved" => Ok(KycStatus::Approved),
            "rejected" => Ok(KycStatus::Rejected),
            _ => Err(format!("unknown kyc status: {s}")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Code(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for KycStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawStatus::deserialize(deserializer)? {
            RawStatus::Code(code) => KycStatus::from_code(code),
            RawStatus::Name(name) => KycStatus::from_name(&name),
        })
    }
}
