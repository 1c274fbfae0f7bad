use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::hhmm;

/// Most recurring slots a single weekday may hold.
pub const MAX_SLOTS_PER_DAY: usize = 2;

/// A weekly-repeating time window attached to a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSlot {
    pub id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated slot definition ready to be handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecurringSlot {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    #[serde(alias = "dayOfWeek")]
    pub day_of_week: i64,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
}
