use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;
use weekslot_core::{store::SlotStore, time::WeekdayNumbering};

use crate::test_utils::TestContext;

async fn create_monday_slot(ctx: &TestContext) -> Uuid {
    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": 1, "start_time": "09:00", "end_time": "17:00" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("created slot should carry an id")
}

async fn get_week(ctx: &TestContext, start: &str) -> Value {
    let response = ctx
        .server
        .get("/slots")
        .add_query_param("start", start)
        .await;
    response.assert_status_ok();
    response.json()
}

#[test_log::test(tokio::test)]
async fn test_create_slot_echoes_record() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": 3, "start_time": "08:30", "end_time": "12:00" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["day_of_week"], json!(3));
    assert_eq!(body["start_time"], json!("08:30"));
    assert_eq!(body["end_time"], json!("12:00"));
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_slot_accepts_camel_case_body() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "dayOfWeek": 0, "startTime": "10:00:00", "endTime": "11:00:00" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["start_time"], json!("10:00"));
}

#[rstest]
#[case(-1)]
#[case(7)]
#[tokio::test]
async fn test_create_slot_rejects_invalid_day(#[case] day: i64) {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": day, "start_time": "09:00", "end_time": "10:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("day_of_week"));
    assert!(ctx.store.list_recurring_slots().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_slot_rejects_third_slot() {
    let ctx = TestContext::new();
    create_monday_slot(&ctx).await;
    create_monday_slot(&ctx).await;

    let response = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": 1, "start_time": "18:00", "end_time": "19:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        json!("Capacity exceeded: Maximum 2 slots allowed per day")
    );
    assert_eq!(ctx.store.list_recurring_slots().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_slot_rejects_malformed_body() {
    let ctx = TestContext::new();

    let missing_field = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": 1, "start_time": "09:00" }))
        .await;
    missing_field.assert_status(StatusCode::BAD_REQUEST);

    let bad_time = ctx
        .server
        .post("/slots")
        .json(&json!({ "day_of_week": 1, "start_time": "morning", "end_time": "10:00" }))
        .await;
    bad_time.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_week_scenario() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;

    let week = get_week(&ctx, "2025-01-05").await;

    let days = week.as_object().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(
        week["2025-01-06"],
        json!([{
            "id": slot_id,
            "day_of_week": 1,
            "start_time": "09:00",
            "end_time": "17:00",
            "date": "2025-01-06",
        }])
    );
    for (date, slots) in days {
        if date != "2025-01-06" {
            assert_eq!(slots, &json!([]), "expected no slots on {}", date);
        }
    }
}

#[tokio::test]
async fn test_get_week_uses_configured_numbering() {
    let ctx = TestContext::with_numbering(WeekdayNumbering::Monday);
    create_monday_slot(&ctx).await;

    let week = get_week(&ctx, "2025-01-05").await;

    // day_of_week 1 is Tuesday when the week starts on Monday
    assert_eq!(week["2025-01-06"], json!([]));
    assert_eq!(week["2025-01-07"][0]["start_time"], json!("09:00"));
}

#[rstest]
#[case("/slots")]
#[case("/slots?start=")]
#[case("/slots?start=2025-02-30")]
#[case("/slots?start=next-week")]
#[tokio::test]
async fn test_get_week_requires_valid_start(#[case] uri: &str) {
    let ctx = TestContext::new();

    let response = ctx.server.get(uri).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("start"));
}

#[tokio::test]
async fn test_get_week_is_idempotent() {
    let ctx = TestContext::new();
    create_monday_slot(&ctx).await;

    let first = ctx.server.get("/slots?start=2025-01-05").await.text();
    let second = ctx.server.get("/slots?start=2025-01-05").await.text();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_upsert_exception_creates_then_updates() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;
    let path = format!("/slots/{}/exception", slot_id);

    let created = ctx
        .server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "start_time": "10:00" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    created.assert_json(&json!({ "message": "Exception created" }));

    let week = get_week(&ctx, "2025-01-05").await;
    let monday = &week["2025-01-06"][0];
    assert_eq!(monday["start_time"], json!("10:00"));
    assert_eq!(monday["end_time"], json!("17:00"));
    assert!(monday["exception_id"].is_string());

    let updated = ctx
        .server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "endTime": "12:00" }))
        .await;
    updated.assert_status_ok();
    updated.assert_json(&json!({ "message": "Exception updated" }));

    let week = get_week(&ctx, "2025-01-05").await;
    let monday = &week["2025-01-06"][0];
    assert_eq!(monday["start_time"], json!("10:00"));
    assert_eq!(monday["end_time"], json!("12:00"));
    assert_eq!(ctx.store.exceptions().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upsert_exception_null_clears_field() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;
    let path = format!("/slots/{}/exception", slot_id);

    ctx.server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "start_time": "10:00", "end_time": "12:00" }))
        .await
        .assert_status(StatusCode::CREATED);
    ctx.server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "start_time": null }))
        .await
        .assert_status_ok();

    let week = get_week(&ctx, "2025-01-05").await;
    let monday = &week["2025-01-06"][0];
    assert_eq!(monday["start_time"], json!("09:00"));
    assert_eq!(monday["end_time"], json!("12:00"));
}

#[tokio::test]
async fn test_upsert_exception_requires_date() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;

    let response = ctx
        .server
        .put(&format!("/slots/{}/exception", slot_id))
        .json(&json!({ "start_time": "10:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Validation error: date is required" }));
}

#[tokio::test]
async fn test_upsert_exception_unknown_slot() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put(&format!("/slots/{}/exception", Uuid::new_v4()))
        .json(&json!({ "date": "2025-01-06", "start_time": "10:00" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exception_rejects_malformed_slot_id() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put("/slots/not-a-uuid/exception")
        .json(&json!({ "date": "2025-01-06" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_exception_without_prior_row() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;

    let response = ctx
        .server
        .delete(&format!("/slots/{}/exception", slot_id))
        .add_query_param("date", "2025-01-06")
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "message": "Exception created and marked as deleted" }));

    let week = get_week(&ctx, "2025-01-05").await;
    assert_eq!(week["2025-01-06"], json!([]));
}

#[tokio::test]
async fn test_delete_then_override_round_trip() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;
    let path = format!("/slots/{}/exception", slot_id);

    ctx.server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "start_time": "11:00", "end_time": "12:00" }))
        .await
        .assert_status(StatusCode::CREATED);

    let deleted = ctx
        .server
        .delete(&path)
        .add_query_param("date", "2025-01-06")
        .await;
    deleted.assert_status_ok();
    deleted.assert_json(&json!({ "message": "Exception marked as deleted" }));
    assert_eq!(get_week(&ctx, "2025-01-05").await["2025-01-06"], json!([]));

    let restored = ctx
        .server
        .put(&path)
        .json(&json!({ "date": "2025-01-06", "start_time": "13:00" }))
        .await;
    restored.assert_status_ok();

    let week = get_week(&ctx, "2025-01-05").await;
    assert_eq!(week["2025-01-06"][0]["start_time"], json!("13:00"));
    assert_eq!(week["2025-01-06"][0]["end_time"], json!("12:00"));
}

#[tokio::test]
async fn test_delete_exception_reads_date_from_query_only() {
    let ctx = TestContext::new();
    let slot_id = create_monday_slot(&ctx).await;

    let response = ctx
        .server
        .delete(&format!("/slots/{}/exception", slot_id))
        .json(&json!({ "date": "2025-01-06" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.store.exceptions().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_exception_unknown_slot() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .delete(&format!("/slots/{}/exception?date=2025-01-06", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Resource not found"));
}
