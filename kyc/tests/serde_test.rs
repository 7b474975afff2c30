//! Integration tests for decoding backend JSON into the entity types.
//!
//! The backend mixes legacy numeric status codes with status names and omits
//! optional fields freely; every fixture here reflects a payload shape seen
//! from it.

use kyc::*;

// ---------------------------------------------------------------------------
// Status encodings
// ---------------------------------------------------------------------------

#[test]
fn test_user_with_numeric_status() {
    let json = r#"{
        "id": "usr-9",
        "email": "ivan.petrov@example.com",
        "firstName": "Ivan",
        "lastName": "Petrov",
        "country": "DE",
        "role": "user",
        "status": 5,
        "createdAt": "2024-03-01T10:00:00Z"
    }"#;

    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.status, KycStatus::Rejected);
    assert_eq!(user.full_name(), "Ivan Petrov");
    assert_eq!(user.role, Role::User);
    assert!(user.created_at.is_some());

    // Status is written back as its name.
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["status"], "Rejected");
}

#[test]
fn test_status_name_variants() {
    for raw in [r#""UnderReview""#, r#""under_review""#, r#""Under Review""#, "3"] {
        let status: KycStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(status, KycStatus::UnderReview, "{raw}");
    }
}

#[test]
fn test_unknown_status_defaults_to_not_submitted() {
    let json = r#"{ "id": "lvl-9", "name": "Trial", "level": 9, "status": 99 }"#;
    let level: KycLevel = serde_json::from_str(json).unwrap();
    assert_eq!(level.status, KycStatus::NotSubmitted);
    assert!(level.is_active);
}

// ---------------------------------------------------------------------------
// Nested references
// ---------------------------------------------------------------------------

#[test]
fn test_user_kyc_level_with_refs() {
    let json = r#"{
        "id": "ukl-1",
        "userId": "usr-1",
        "levelId": "lvl-2",
        "status": "Approved",
        "comments": null,
        "reviewedAt": "2024-06-01T09:30:00Z",
        "user": { "id": "usr-1", "email": "alice.johnson@example.com", "firstName": "Alice", "lastName": "Johnson" },
        "level": { "id": "lvl-2", "name": "Enhanced", "level": 2 }
    }"#;

    let record: UserKycLevel = serde_json::from_str(json).unwrap();
    assert_eq!(record.status, KycStatus::Approved);
    assert!(record.comments.is_none());
    assert_eq!(record.level.as_ref().map(|l| l.name.as_str()), Some("Enhanced"));
    assert_eq!(
        record.field("level.name"),
        Some(FieldValue::Text("Enhanced".into()))
    );
    assert!(record.matches_search("ALICE"));
}

#[test]
fn test_paginated_response_of_details() {
    let json = r#"{
        "items": [
            { "id": "det-1", "levelId": "lvl-1", "name": "Full name", "fieldType": "text", "isRequired": true, "sequence": 1 },
            { "id": "det-2", "levelId": "lvl-1", "name": "Date of birth", "fieldType": "date" }
        ],
        "total_count": 2,
        "total_pages": 1,
        "has_next": false,
        "has_previous": false
    }"#;

    let page: PaginatedResponse<KycDetail> = serde_json::from_str(json).unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].is_required);
    assert_eq!(page.items[1].sequence, None);
    assert_eq!(page.items[1].status, KycStatus::NotSubmitted);
}

#[test]
fn test_unknown_filter_operator_survives_decoding() {
    let json = r#"{
        "page": 1,
        "page_size": 10,
        "filters": [{ "field": "name", "operator": "regex", "value": "^B" }]
    }"#;
    let params: PaginationParams = serde_json::from_str(json).unwrap();
    assert_eq!(
        params.filters[0].operator,
        FilterOperator::Unknown("regex".into())
    );
    let err = run_query(&samples::kyc_levels(), &params).unwrap_err();
    assert!(matches!(err, KycError::UnsupportedOperator(op) if op == "regex"));
}
