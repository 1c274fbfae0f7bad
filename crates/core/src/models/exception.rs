use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::{hhmm, nullable};

/// A date-specific override or cancellation of one recurring slot occurrence.
///
/// At most one exception exists per `(recurring_slot_id, date)`. When
/// `is_deleted` is set the occurrence is cancelled and any stored override
/// times are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotException {
    pub id: Uuid,
    pub recurring_slot_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm::option", default)]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "hhmm::option", default)]
    pub end_time: Option<NaiveTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What an override does to one stored time field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeChange {
    /// Field was not sent; the stored value stays.
    #[default]
    Keep,
    /// Field was sent as `null`; the stored override is removed.
    Clear,
    Set(NaiveTime),
}

impl TimeChange {
    /// The value after applying this change to `current`.
    pub fn apply(self, current: Option<NaiveTime>) -> Option<NaiveTime> {
        match self {
            TimeChange::Keep => current,
            TimeChange::Clear => None,
            TimeChange::Set(time) => Some(time),
        }
    }

    pub fn is_keep(self) -> bool {
        matches!(self, TimeChange::Keep)
    }
}

/// What a write to the exception store should do to the `(slot, date)` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionChange {
    /// Apply per-field time changes and clear the cancellation flag.
    Override {
        start_time: TimeChange,
        end_time: TimeChange,
    },
    /// Set the cancellation flag, leaving stored override times alone.
    Cancel,
}

impl ExceptionChange {
    pub fn is_cancel(&self) -> bool {
        matches!(self, ExceptionChange::Cancel)
    }
}

/// Result of applying an [`ExceptionChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionOutcome {
    pub created: bool,
    pub exception: SlotException,
}

impl ExceptionOutcome {
    pub fn message(&self) -> &'static str {
        match (self.exception.is_deleted, self.created) {
            (false, true) => "Exception created",
            (false, false) => "Exception updated",
            (true, true) => "Exception created and marked as deleted",
            (true, false) => "Exception marked as deleted",
        }
    }
}

/// Body of an override. Time fields distinguish absent (`None`) from
/// `null` (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertExceptionRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(
        default,
        alias = "startTime",
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<Option<String>>,
    #[serde(
        default,
        alias = "endTime",
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteExceptionQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionResponse {
    pub message: String,
}
