//! Integration tests for the REST contract, run against a wiremock server.
//!
//! Covers the enhanced pagination request shapes, 404 handling, the
//! sample-data fallback when the backend fails, and the admin mutations.

use std::sync::Arc;
use std::time::Duration;

use kyc::controller::{ListController, StatusFilter};
use kyc::samples;
use kyc::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> KycClient {
    let config = KycConfig::new(&server.uri(), Duration::from_secs(5)).unwrap();
    KycClient::new(config).unwrap()
}

fn admin_state() -> AppState {
    reduce(AppState::default(), Action::SignedIn(Session::mock_admin()))
}

fn level_json(id: &str, name: &str, level: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "level": level,
        "status": 4,
        "isActive": true
    })
}

// ---------------------------------------------------------------------------
// Enhanced pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_enhanced_post_body_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kyc-levels/paginated/enhanced"))
        .and(body_json(json!({
            "page": 2,
            "page_size": 5,
            "fetch_all": false,
            "search": "basic",
            "sort_by": [{ "field": "level", "order": "desc" }],
            "filters": [{ "field": "status", "operator": "equals", "value": "Approved" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [level_json("lvl-1", "Basic", 1)],
            "total_count": 6,
            "total_pages": 2,
            "has_next": false,
            "has_previous": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let params = PaginationParams::new(2, 5)
        .with_search("basic")
        .with_sort("level", SortOrder::Desc)
        .with_filter(FilterCondition::equals("status", "Approved"));
    let page: PaginatedResponse<KycLevel> = client.http.paginated_enhanced(&params).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, KycStatus::Approved);
    assert_eq!(page.total_count, 6);
    assert!(page.has_previous);
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_enhanced_get_sends_first_sort_clause_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/paginated/enhanced"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "10"))
        .and(query_param("search", "garcia"))
        .and(query_param("sort_field", "lastName"))
        .and(query_param("sort_order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "total_count": 0,
            "total_pages": 0,
            "has_next": false,
            "has_previous": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let params = PaginationParams::new(1, 10)
        .with_search("garcia")
        .with_sort("lastName", SortOrder::Asc)
        .with_sort("email", SortOrder::Desc);
    let page: PaginatedResponse<User> = client.http.paginated_enhanced_query(&params).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_invalid_params_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .http
        .paginated_enhanced::<KycLevel>(&PaginationParams::new(0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, KycError::Validation(_)));
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_one_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kyc-levels/lvl-404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.http.get_one::<KycLevel>("lvl-404").await {
        Err(KycError::NotFound { entity, id }) => {
            assert_eq!(entity, KycLevel::NAME);
            assert_eq!(id, "lvl-404");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kyc-levels"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.levels().await.unwrap_err();
    assert!(err.is_network());
    assert!(matches!(err, KycError::Http { status: 500, .. }));
}

#[tokio::test]
async fn test_details_for_level_sorted_by_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kyc-details"))
        .and(query_param("level_id", "lvl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "det-b", "levelId": "lvl-1", "name": "Date of birth", "fieldType": "date", "sequence": 2 },
            { "id": "det-a", "levelId": "lvl-1", "name": "Full name", "fieldType": "text", "sequence": 1 }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let details = client.details_for_level("lvl-1").await.unwrap();
    let ids: Vec<&str> = details.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["det-a", "det-b"]);
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_failed_remote_falls_back_to_local_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/paginated/enhanced"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let loader = client.page_loader(Some(SampleData::new(samples::users())));
    let mut controller = ListController::new(Arc::new(loader), "lastName");

    controller
        .set_status_filter(StatusFilter::Only(KycStatus::Approved))
        .await;

    let expected = run_query(&samples::users(), &controller.params()).unwrap();
    let state = controller.state();
    assert_eq!(state.origin, Some(PageOrigin::Fallback));
    assert!(state.error.is_none());
    assert!(!state.items.is_empty());
    assert!(state.items.iter().all(|u| u.status == KycStatus::Approved));
    assert_eq!(state.items, expected.items);
    assert_eq!(state.total_count, expected.total_count);
    assert_eq!(state.total_pages, expected.total_pages);
}

#[tokio::test]
async fn test_failed_remote_without_fallback_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/paginated/enhanced"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let loader = client.page_loader::<User>(None);
    let err = loader.load_page(&PaginationParams::default()).await.unwrap_err();
    assert!(matches!(err, KycError::Http { status: 502, .. }));
}

// ---------------------------------------------------------------------------
// Review + reorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_reject_without_comments_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut state = admin_state();
    let decision = ReviewDecision::Reject {
        comments: "  ".into(),
    };
    let err = client
        .review_user_level(&mut state, "ukl-5", &decision)
        .await
        .unwrap_err();
    assert!(matches!(err, KycError::Validation(_)));
    assert!(state.admin.error.is_some());
    assert!(!state.admin.saving);
}

#[tokio::test]
async fn test_approve_user_level() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user-kyc-levels/ukl-5"))
        .and(body_partial_json(json!({ "status": "Approved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ukl-5",
            "userId": "usr-3",
            "levelId": "lvl-1",
            "status": "Approved"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut state = admin_state();
    let updated = client
        .review_user_level(&mut state, "ukl-5", &ReviewDecision::Approve { comments: None })
        .await
        .unwrap();
    assert_eq!(updated.status, KycStatus::Approved);
    assert!(state.is_stale(UserKycLevel::PATH));
    assert!(state.admin.error.is_none());
}

#[tokio::test]
async fn test_review_requires_admin() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    let mut state = reduce(AppState::default(), Action::SignedIn(Session::mock_user("usr-2")));
    let err = client
        .review_user_detail(&mut state, "ukd-1", &ReviewDecision::Approve { comments: None })
        .await
        .unwrap_err();
    assert!(matches!(err, KycError::Validation(_)));
}

#[tokio::test]
async fn test_failed_review_records_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user-kyc-details/ukd-7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut state = admin_state();
    let decision = ReviewDecision::Reject {
        comments: "expired".into(),
    };
    assert!(client
        .review_user_detail(&mut state, "ukd-7", &decision)
        .await
        .is_err());
    assert!(state.admin.error.as_deref().unwrap_or_default().contains("500"));
    assert!(!state.is_stale(UserKycDetail::PATH));
}

#[tokio::test]
async fn test_save_detail_sequence_puts_changed_only() {
    let server = MockServer::start().await;
    let before: Vec<KycDetail> = samples::kyc_details()
        .into_iter()
        .filter(|d| d.level_id == "lvl-1")
        .take(4)
        .collect();
    assert_eq!(before.len(), 4);

    let mut list = ReorderableList::new(before.clone());
    assert!(list.move_by_index(3, 0).is_some());
    let after = list.into_items();

    for detail in &after {
        Mock::given(method("PUT"))
            .and(path(format!("/kyc-details/{}", detail.id)))
            .and(body_json(json!({ "sequence": detail.sequence })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&detail))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server).await;
    let mut state = admin_state();
    let saved = client
        .save_detail_sequence(&mut state, &before, &after)
        .await
        .unwrap();
    assert_eq!(saved, 4);
    assert!(state.is_stale(KycDetail::PATH));
}
