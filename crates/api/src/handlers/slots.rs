//! # Slot Handlers
//!
//! HTTP entry points for the weekly schedule. Each handler extracts request
//! parameters, calls [`SlotService`](weekslot_core::service::SlotService) and
//! picks the response status; all rules live in the service and the store.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;
use weekslot_core::models::{
    exception::{DeleteExceptionQuery, ExceptionOutcome, ExceptionResponse, UpsertExceptionRequest},
    recurring_slot::{CreateSlotRequest, RecurringSlot},
    week::{WeekQuery, WeekSchedule},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Creates a recurring slot
///
/// ```text
/// POST /slots
/// {"day_of_week": 1, "start_time": "09:00", "end_time": "17:00"}
/// ```
///
/// Answers 201 with the stored record, 400 for an invalid weekday or a full
/// weekday.
#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateSlotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecurringSlot>), AppError> {
    let Json(payload) = payload?;

    let slot = state.service.create_slot(&payload).await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

/// Returns the materialized week starting at `start`
///
/// ```text
/// GET /slots?start=2025-01-05
/// ```
#[axum::debug_handler]
pub async fn get_week(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<WeekSchedule>, AppError> {
    let Query(query) = query?;

    let week = state.service.week(query.start.as_deref()).await?;

    Ok(Json(week))
}

/// Overrides the times of one occurrence
///
/// ```text
/// PUT /slots/{id}/exception
/// {"date": "2025-01-06", "start_time": "10:00"}
/// ```
///
/// Answers 201 when the exception row is new, 200 when an existing one was
/// updated.
#[axum::debug_handler]
pub async fn upsert_exception(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpsertExceptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExceptionResponse>), AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let outcome = state.service.upsert_exception(id, &payload).await?;

    Ok(exception_response(&outcome))
}

/// Cancels one occurrence
///
/// ```text
/// DELETE /slots/{id}/exception?date=2025-01-06
/// ```
///
/// The date is only read from the query string.
#[axum::debug_handler]
pub async fn delete_exception(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<DeleteExceptionQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ExceptionResponse>), AppError> {
    let Path(id) = id?;
    let Query(query) = query?;

    let outcome = state
        .service
        .delete_exception(id, query.date.as_deref())
        .await?;

    Ok(exception_response(&outcome))
}

fn exception_response(outcome: &ExceptionOutcome) -> (StatusCode, Json<ExceptionResponse>) {
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(ExceptionResponse {
            message: outcome.message().to_string(),
        }),
    )
}
