//! PostgreSQL implementation of the [`SlotStore`] port.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;
use weekslot_core::{
    models::{
        exception::{ExceptionChange, SlotException},
        recurring_slot::{NewRecurringSlot, RecurringSlot},
    },
    store::{ExceptionWrite, SlotInsert, SlotStore},
};

use crate::{
    DbPool,
    repositories::{recurring_slot, slot_exception},
};

#[derive(Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn insert_recurring_slot(&self, slot: &NewRecurringSlot) -> Result<SlotInsert> {
        let created = recurring_slot::create_recurring_slot(
            &self.pool,
            slot.day_of_week,
            slot.start_time,
            slot.end_time,
        )
        .await?;

        Ok(match created {
            Some(row) => SlotInsert::Inserted(row.into()),
            None => SlotInsert::Conflict,
        })
    }

    async fn list_recurring_slots(&self) -> Result<Vec<RecurringSlot>> {
        let rows = recurring_slot::list_recurring_slots(&self.pool).await?;
        Ok(rows.into_iter().map(RecurringSlot::from).collect())
    }

    async fn list_exceptions_on(&self, dates: &[NaiveDate]) -> Result<Vec<SlotException>> {
        let rows = slot_exception::list_exceptions_on_dates(&self.pool, dates).await?;
        Ok(rows.into_iter().map(SlotException::from).collect())
    }

    async fn apply_exception(
        &self,
        recurring_slot_id: Uuid,
        date: NaiveDate,
        change: ExceptionChange,
    ) -> Result<ExceptionWrite> {
        let written =
            slot_exception::apply_exception(&self.pool, recurring_slot_id, date, &change).await?;

        Ok(match written {
            Some(row) if row.inserted => ExceptionWrite::Created(row.exception.into()),
            Some(row) => ExceptionWrite::Updated(row.exception.into()),
            None => ExceptionWrite::UnknownSlot,
        })
    }
}
