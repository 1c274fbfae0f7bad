use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use weekslot_core::time::WeekdayNumbering;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version_reports_week_start() {
    let ctx = TestContext::with_numbering(WeekdayNumbering::Monday);

    let body: Value = ctx.server.get("/version").await.json();

    assert_eq!(body["week_start"], json!("monday"));
    assert!(body["version"].is_string());
}
