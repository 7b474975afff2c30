use crate::error::{KycError, Result};
use crate::types::{Entity, KycDetail, KycLevel, User};

/// Find a record by its ID.
///
/// # Errors
///
/// Returns `KycError::NotFound` naming the entity if no record matches.
pub fn find_by_id<'a, T: Entity>(records: &'a [T], id: &str) -> Result<&'a T> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| KycError::NotFound {
            entity: T::NAME,
            id: id.to_string(),
        })
}

/// Find a KYC level by its ID.
pub fn find_level<'a>(levels: &'a [KycLevel], id: &str) -> Result<&'a KycLevel> {
    find_by_id(levels, id)
}

/// Find a KYC detail by its ID.
pub fn find_detail<'a>(details: &'a [KycDetail], id: &str) -> Result<&'a KycDetail> {
    find_by_id(details, id)
}

/// Find a user by ID, or by email (case-insensitive).
pub fn find_user<'a>(users: &'a [User], id_or_email: &str) -> Result<&'a User> {
    users
        .iter()
        .find(|u| u.id == id_or_email || u.email.eq_ignore_ascii_case(id_or_email))
        .ok_or_else(|| KycError::NotFound {
            entity: User::NAME,
            id: id_or_email.to_string(),
        })
}
