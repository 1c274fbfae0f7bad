//! # Error Handling Middleware
//!
//! This module maps domain errors from `weekslot_core` to HTTP status codes
//! and JSON error bodies, so every handler reports failures the same way.
//!
//! | Error | Status |
//! |---|---|
//! | `Validation` | 400 |
//! | `CapacityExceeded` | 400 |
//! | `NotFound` | 404 |
//! | `Database` | 500 |
//!
//! Database failures are logged in full and answered with a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use weekslot_core::errors::SlotError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use weekslot_api::middleware::error_handling::AppError;
/// use weekslot_core::errors::SlotError;
///
/// async fn handler(day_of_week: i64) -> Result<Json<i64>, AppError> {
///     if !(0..=6).contains(&day_of_week) {
///         return Err(AppError(SlotError::Validation("Invalid day_of_week".to_string())));
///     }
///     Ok(Json(day_of_week))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::CapacityExceeded(_) => StatusCode::BAD_REQUEST,
            SlotError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            SlotError::Database(report) => {
                error!(error = ?report, "Unexpected failure while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `SlotResult` values inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Wraps infrastructure failures as `SlotError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Database(err))
    }
}

// Extractor rejections are client mistakes and answer 400 like any other
// validation failure.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(SlotError::Validation(rejection.body_text()))
    }
}

/// Maps a SlotError to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}
