use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use weekslot_core::models::{exception::SlotException, recurring_slot::RecurringSlot};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRecurringSlot {
    pub id: Uuid,
    pub day_of_week: i16,
    /// Position of the slot within its weekday, 0 or 1
    pub slot_index: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbRecurringSlot> for RecurringSlot {
    fn from(row: DbRecurringSlot) -> Self {
        RecurringSlot {
            id: row.id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotException {
    pub id: Uuid,
    pub recurring_slot_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSlotException> for SlotException {
    fn from(row: DbSlotException) -> Self {
        SlotException {
            id: row.id,
            recurring_slot_id: row.recurring_slot_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row returned by the exception upsert, flagged with whether it was inserted.
#[derive(Debug, Clone, FromRow)]
pub struct DbExceptionUpsert {
    #[sqlx(flatten)]
    pub exception: DbSlotException,
    pub inserted: bool,
}
