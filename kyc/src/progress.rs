//! End-user view of their own verification progress.

use serde::Serialize;

use crate::types::{KycLevel, KycStatus, UserKycLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level_id: String,
    pub name: String,
    pub ordinal: u32,
    pub status: KycStatus,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationProgress {
    pub user_id: String,
    pub levels: Vec<LevelProgress>,
    pub approved: usize,
    pub total: usize,
    /// Whole-number percentage of active levels approved.
    pub percent: u8,
    /// First level, by ordinal, that is not yet approved.
    pub current_level: Option<String>,
}

/// Combine the level catalogue with one user's submissions.
///
/// Inactive levels are left out. A level the user never submitted counts as
/// `NotSubmitted`; if several submissions exist for a level the most recently
/// updated one wins.
pub fn compute(user_id: &str, levels: &[KycLevel], submissions: &[UserKycLevel]) -> VerificationProgress {
    let mut active: Vec<&KycLevel> = levels.iter().filter(|l| l.is_active).collect();
    active.sort_by_key(|l| l.level);

    let rows: Vec<LevelProgress> = active
        .into_iter()
        .map(|level| {
            let latest = submissions
                .iter()
                .filter(|s| s.user_id == user_id && s.level_id == level.id)
                .max_by_key(|s| s.last_updated);
            LevelProgress {
                level_id: level.id.clone(),
                name: level.name.clone(),
                ordinal: level.level,
                status: latest.map_or(KycStatus::NotSubmitted, |s| s.status),
                comments: latest.and_then(|s| s.comments.clone()),
            }
        })
        .collect();

    let total = rows.len();
    let approved = rows.iter().filter(|r| r.status == KycStatus::Approved).count();
    let percent = if total == 0 {
        0
    } else {
        (approved * 100 / total) as u8
    };
    let current_level = rows
        .iter()
        .find(|r| r.status != KycStatus::Approved)
        .map(|r| r.level_id.clone());

    VerificationProgress {
        user_id: user_id.to_string(),
        levels: rows,
        approved,
        total,
        percent,
        current_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[test]
    fn test_user_with_two_approved_levels() {
        let progress = compute("usr-1", &samples::kyc_levels(), &samples::user_kyc_levels());
        assert_eq!(progress.total, 3);
        assert_eq!(progress.approved, 2);
        assert_eq!(progress.percent, 66);
        assert_eq!(progress.current_level.as_deref(), Some("lvl-3"));
        assert_eq!(progress.levels[2].status, KycStatus::NotSubmitted);
    }

    #[test]
    fn test_rejected_level_carries_comments() {
        let progress = compute("usr-6", &samples::kyc_levels(), &samples::user_kyc_levels());
        assert_eq!(progress.levels[0].status, KycStatus::Rejected);
        assert_eq!(progress.levels[0].comments.as_deref(), Some("Document expired"));
        assert_eq!(progress.current_level.as_deref(), Some("lvl-1"));
    }

    #[test]
    fn test_unknown_user_has_nothing_submitted() {
        let progress = compute("nobody", &samples::kyc_levels(), &samples::user_kyc_levels());
        assert_eq!(progress.approved, 0);
        assert_eq!(progress.percent, 0);
        assert!(progress.levels.iter().all(|l| l.status == KycStatus::NotSubmitted));
    }

    #[test]
    fn test_no_levels() {
        let progress = compute("usr-1", &[], &samples::user_kyc_levels());
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percent, 0);
        assert!(progress.current_level.is_none());
    }
}
