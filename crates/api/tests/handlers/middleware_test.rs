use axum::http::StatusCode;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;
use weekslot_api::middleware::error_handling::map_error;
use weekslot_core::{errors::SlotError, store::ExceptionWrite};
use weekslot_db::mock::repositories::MockSlotStore;

use crate::test_utils::mock_server;

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(SlotError::NotFound("Resource not found".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let response = map_error(SlotError::Validation("Invalid input".to_string()));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_capacity_exceeded() {
    let response = map_error(SlotError::CapacityExceeded("Day is full".to_string()));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_database() {
    let response = map_error(SlotError::Database(eyre::eyre!("Database error")));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_store_failure_is_hidden_from_client() {
    let mut store = MockSlotStore::new();
    store
        .expect_list_recurring_slots()
        .times(1)
        .returning(|| Err(eyre::eyre!("connection refused by db-primary:5432")));
    let server = mock_server(store);

    let response = server.get("/slots?start=2025-01-05").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert!(!response.text().contains("db-primary"));
}

#[tokio::test]
async fn test_exception_store_failure_maps_to_500() {
    let slot_id = Uuid::new_v4();
    let mut store = MockSlotStore::new();
    store
        .expect_apply_exception()
        .with(predicate::eq(slot_id), predicate::always(), predicate::always())
        .times(1)
        .returning(|_, _, _| Err(eyre::eyre!("deadlock detected")));
    let server = mock_server(store);

    let response = server
        .delete(&format!("/slots/{}/exception?date=2025-01-06", slot_id))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_slot_outcome_maps_to_404() {
    let mut store = MockSlotStore::new();
    store
        .expect_apply_exception()
        .times(1)
        .returning(|_, _, _| Ok(ExceptionWrite::UnknownSlot));
    let server = mock_server(store);

    let response = server
        .put(&format!("/slots/{}/exception", Uuid::new_v4()))
        .json(&json!({ "date": "2025-01-06" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_happens_before_store_access() {
    // No expectations: any store call would panic
    let server = mock_server(MockSlotStore::new());

    server
        .post("/slots")
        .json(&json!({ "day_of_week": 9, "start_time": "09:00", "end_time": "10:00" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .delete(&format!("/slots/{}/exception", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
