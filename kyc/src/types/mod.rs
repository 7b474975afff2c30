pub mod assignment;
pub mod detail;
pub mod level;
pub mod page;
pub mod status;
pub mod user;
pub mod user_level;

pub use assignment::*;
pub use detail::*;
pub use level::*;
pub use page::*;
pub use status::*;
pub use user::*;
pub use user_level::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::query::field::Record;

/// A REST resource served under `/{PATH}`.
pub trait Entity: Record + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path segment, e.g. `kyc-levels`.
    const PATH: &'static str;
    /// Human-readable singular name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

/// The list pages the console knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    KycLevels,
    KycDetails,
    Users,
    UserKycLevels,
    UserKycDetails,
    CountryAssignments,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::KycLevels,
        EntityKind::KycDetails,
        EntityKind::Users,
        EntityKind::UserKycLevels,
        EntityKind::UserKycDetails,
        EntityKind::CountryAssignments,
    ];

    pub fn path(self) -> &'static str {
        match self {
            EntityKind::KycLevels => KycLevel::PATH,
            EntityKind::KycDetails => KycDetail::PATH,
            EntityKind::Users => User::PATH,
            EntityKind::UserKycLevels => UserKycLevel::PATH,
            EntityKind::UserKycDetails => UserKycDetail::PATH,
            EntityKind::CountryAssignments => CountryKycAssignment::PATH,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::KycLevels => "KYC Levels",
            EntityKind::KycDetails => "KYC Details",
            EntityKind::Users => "Users",
            EntityKind::UserKycLevels => "User KYC Levels",
            EntityKind::UserKycDetails => "User KYC Details",
            EntityKind::CountryAssignments => "Country Assignments",
        }
    }
}
