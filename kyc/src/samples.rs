//! Built-in offline sample records.
//!
//! List pages fall back to these when the enhanced paginated endpoint cannot
//! be reached, so the console stays usable without a backend. They are plain
//! values; wrap them in [`crate::loader::SampleData`] to serve queries.

use chrono::{DateTime, TimeZone, Utc};

use crate::loader::SampleData;
use crate::types::*;

/// Entities that ship with a built-in sample set.
pub trait Builtin: Entity {
    fn builtin() -> Vec<Self>;
}

impl<T: Builtin> SampleData<T> {
    /// The built-in sample set for `T`.
    pub fn builtin() -> Self {
        SampleData::new(T::builtin())
    }
}

fn ts(month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, month, day, 9, 30, 0).single()
}

fn level_ref(id: &str, name: &str, level: u32) -> Option<KycLevelRef> {
    Some(KycLevelRef {
        id: id.into(),
        name: name.into(),
        level: Some(level),
    })
}

pub fn kyc_levels() -> Vec<KycLevel> {
    [
        ("lvl-1", "Basic", "Identity and contact details", 1, true),
        ("lvl-2", "Enhanced", "Government ID and proof of address", 2, true),
        ("lvl-3", "Corporate", "Company registration and beneficial owners", 3, true),
        ("lvl-4", "Institutional", "Regulated entity due diligence", 4, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, description, level, is_active))| KycLevel {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        level,
        status: if is_active {
            KycStatus::Approved
        } else {
            KycStatus::InProgress
        },
        is_active,
        created_at: ts(1, 2 + i as u32),
        last_updated: ts(3, 10 + i as u32),
    })
    .collect()
}

pub fn kyc_details() -> Vec<KycDetail> {
    let rows: [(&str, &str, &str, &str, &str, bool); 10] = [
        ("det-1", "lvl-1", "Full name", "Legal first and last name", "text", true),
        ("det-2", "lvl-1", "Date of birth", "As shown on ID", "date", true),
        ("det-3", "lvl-1", "Email verification", "One-time code", "email", true),
        ("det-4", "lvl-1", "Phone number", "Mobile with country code", "phone", false),
        ("det-5", "lvl-2", "Government ID", "Passport or national ID", "document", true),
        ("det-6", "lvl-2", "Proof of address", "Utility bill under 3 months", "document", true),
        ("det-7", "lvl-2", "Selfie", "Liveness check", "image", true),
        ("det-8", "lvl-3", "Registration certificate", "Company registry extract", "document", true),
        ("det-9", "lvl-3", "Beneficial owners", "Owners above 25%", "text", true),
        ("det-10", "lvl-3", "Board resolution", "Signed authorisation", "document", false),
    ];
    let levels = kyc_levels();

    let mut sequence_in_level = 0;
    let mut current_level = "";
    rows.into_iter()
        .enumerate()
        .map(|(i, (id, level_id, name, description, field_type, is_required))| {
            if level_id != current_level {
                current_level = level_id;
                sequence_in_level = 0;
            }
            sequence_in_level += 1;
            let level = levels
                .iter()
                .find(|l| l.id == level_id)
                .and_then(|l| level_ref(&l.id, &l.name, l.level));
            KycDetail {
                id: id.into(),
                level_id: level_id.into(),
                name: name.into(),
                description: description.into(),
                field_type: field_type.into(),
                is_required,
                sequence: Some(sequence_in_level),
                status: KycStatus::Approved,
                level,
                created_at: ts(1, 5 + i as u32),
                last_updated: ts(4, 1 + i as u32),
            }
        })
        .collect()
}

pub fn users() -> Vec<User> {
    let rows: [(&str, &str, &str, i64); 23] = [
        ("Alice", "Johnson", "US", 4),
        ("Bruno", "Garcia", "ES", 3),
        ("Chen", "Wei", "SG", 2),
        ("Dana", "Smith", "US", 1),
        ("Emeka", "Okafor", "NG", 4),
        ("Fatima", "Khan", "GB", 5),
        ("Gustav", "Larsen", "DE", 0),
        ("Hana", "Sato", "JP", 4),
        ("Ivan", "Petrov", "DE", 3),
        ("Julia", "Garcia", "US", 4),
        ("Kofi", "Mensah", "GH", 2),
        ("Lena", "Fischer", "DE", 4),
        ("Mateo", "Rossi", "IT", 5),
        ("Nora", "Berg", "NO", 1),
        ("Omar", "Haddad", "AE", 4),
        ("Priya", "Patel", "GB", 3),
        ("Quinn", "Murphy", "IE", 0),
        ("Rosa", "Lopez", "MX", 2),
        ("Sam", "Taylor", "US", 5),
        ("Tomas", "Novak", "CZ", 4),
        ("Uma", "Reddy", "IN", 1),
        ("Victor", "Dubois", "FR", 3),
        ("Wen", "Li", "US", 4),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (first, last, country, code))| User {
            id: format!("usr-{}", i + 1),
            email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
            first_name: first.into(),
            last_name: last.into(),
            country: country.into(),
            role: if i == 0 { Role::Admin } else { Role::User },
            status: KycStatus::from_code(code),
            created_at: ts(1 + (i as u32 % 12), 1 + (i as u32 * 3) % 28),
            last_updated: ts(12, 1 + i as u32),
        })
        .collect()
}

pub fn user_kyc_levels() -> Vec<UserKycLevel> {
    let users = users();
    let levels = kyc_levels();
    let rows: [(usize, usize, KycStatus, Option<&str>); 10] = [
        (0, 0, KycStatus::Approved, None),
        (0, 1, KycStatus::Approved, None),
        (1, 0, KycStatus::Approved, None),
        (1, 1, KycStatus::UnderReview, None),
        (2, 0, KycStatus::Submitted, None),
        (3, 0, KycStatus::InProgress, None),
        (4, 0, KycStatus::Approved, None),
        (4, 1, KycStatus::Submitted, None),
        (5, 0, KycStatus::Rejected, Some("Document expired")),
        (9, 2, KycStatus::UnderReview, None),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (u, l, status, comments))| {
            let user = &users[u];
            let level = &levels[l];
            UserKycLevel {
                id: format!("ukl-{}", i + 1),
                user_id: user.id.clone(),
                level_id: level.id.clone(),
                status,
                comments: comments.map(Into::into),
                submitted_at: ts(5, 1 + i as u32),
                reviewed_at: matches!(status, KycStatus::Approved | KycStatus::Rejected)
                    .then(|| ts(6, 1 + i as u32))
                    .flatten(),
                user: Some(UserRef::from(user)),
                level: Some(KycLevelRef::from(level)),
                created_at: ts(5, 1 + i as u32),
                last_updated: ts(6, 2 + i as u32),
            }
        })
        .collect()
}

pub fn user_kyc_details() -> Vec<UserKycDetail> {
    let details = kyc_details();
    let rows: [(&str, &str, usize, &str, KycStatus); 8] = [
        ("usr-1", "ukl-1", 0, "Alice Johnson", KycStatus::Approved),
        ("usr-1", "ukl-1", 1, "1990-04-12", KycStatus::Approved),
        ("usr-1", "ukl-2", 4, "passport-5521.pdf", KycStatus::Approved),
        ("usr-2", "ukl-4", 4, "id-card-881.png", KycStatus::UnderReview),
        ("usr-2", "ukl-4", 5, "bill-march.pdf", KycStatus::UnderReview),
        ("usr-3", "ukl-5", 0, "Chen Wei", KycStatus::Submitted),
        ("usr-6", "ukl-9", 4, "passport-expired.pdf", KycStatus::Rejected),
        ("usr-4", "ukl-6", 0, "Dana Smith", KycStatus::InProgress),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (user_id, ukl, d, value, status))| {
            let detail = &details[d];
            UserKycDetail {
                id: format!("ukd-{}", i + 1),
                user_id: user_id.into(),
                detail_id: detail.id.clone(),
                user_kyc_level_id: Some(ukl.into()),
                value: Some(value.into()),
                status,
                comments: (status == KycStatus::Rejected).then(|| "Document expired".into()),
                detail: Some(KycDetailRef {
                    id: detail.id.clone(),
                    name: detail.name.clone(),
                    field_type: detail.field_type.clone(),
                }),
                created_at: ts(5, 3 + i as u32),
                last_updated: ts(6, 3 + i as u32),
            }
        })
        .collect()
}

pub fn country_assignments() -> Vec<CountryKycAssignment> {
    let levels = kyc_levels();
    let rows: [(&str, &str, usize, bool); 8] = [
        ("US", "United States", 1, true),
        ("GB", "United Kingdom", 1, true),
        ("DE", "Germany", 0, true),
        ("SG", "Singapore", 1, true),
        ("NG", "Nigeria", 1, true),
        ("JP", "Japan", 0, true),
        ("AE", "United Arab Emirates", 2, true),
        ("MX", "Mexico", 0, false),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, (code, name, l, is_active))| {
            let level = &levels[l];
            CountryKycAssignment {
                id: format!("cka-{}", i + 1),
                country_code: code.into(),
                country_name: name.into(),
                level_id: level.id.clone(),
                is_active,
                status: if is_active {
                    KycStatus::Approved
                } else {
                    KycStatus::NotSubmitted
                },
                level: Some(KycLevelRef::from(level)),
                created_at: ts(2, 1 + i as u32),
                last_updated: ts(7, 1 + i as u32),
            }
        })
        .collect()
}

impl Builtin for KycLevel {
    fn builtin() -> Vec<Self> {
        kyc_levels()
    }
}

impl Builtin for KycDetail {
    fn builtin() -> Vec<Self> {
        kyc_details()
    }
}

impl Builtin for User {
    fn builtin() -> Vec<Self> {
        users()
    }
}

impl Builtin for UserKycLevel {
    fn builtin() -> Vec<Self> {
        user_kyc_levels()
    }
}

impl Builtin for UserKycDetail {
    fn builtin() -> Vec<Self> {
        user_kyc_details()
    }
}

impl Builtin for CountryKycAssignment {
    fn builtin() -> Vec<Self> {
        country_assignments()
    }
}
