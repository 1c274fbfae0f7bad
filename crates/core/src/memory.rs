//! In-process [`SlotStore`] used by tests and local runs without PostgreSQL.
//!
//! A single mutex covers every check-and-write, which gives the same
//! atomicity the database gets from its unique constraints.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{Result, eyre};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::{
    models::{
        exception::{ExceptionChange, SlotException},
        recurring_slot::{MAX_SLOTS_PER_DAY, NewRecurringSlot, RecurringSlot},
    },
    store::{ExceptionWrite, SlotInsert, SlotStore},
};

#[derive(Debug, Default)]
pub struct InMemorySlotStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    slots: Vec<RecurringSlot>,
    exceptions: Vec<SlotException>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored exception, including cancelled ones.
    pub fn exceptions(&self) -> Result<Vec<SlotException>> {
        Ok(self.lock()?.exceptions.clone())
    }

    /// Removes a recurring slot together with the exceptions it owns.
    pub fn remove_recurring_slot(&self, id: Uuid) -> Result<bool> {
        let mut state = self.lock()?;
        let before = state.slots.len();
        state.slots.retain(|slot| slot.id != id);
        state
            .exceptions
            .retain(|exception| exception.recurring_slot_id != id);
        Ok(state.slots.len() != before)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| eyre!("In-memory slot store lock poisoned"))
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn insert_recurring_slot(&self, slot: &NewRecurringSlot) -> Result<SlotInsert> {
        let mut state = self.lock()?;

        let taken = state
            .slots
            .iter()
            .filter(|existing| existing.day_of_week == slot.day_of_week)
            .count();
        if taken >= MAX_SLOTS_PER_DAY {
            return Ok(SlotInsert::Conflict);
        }

        let now = Utc::now();
        let created = RecurringSlot {
            id: Uuid::new_v4(),
            day_of_week: slot.day_of_week,
            start_time: slot.start_time,
            end_time: slot.end_time,
            created_at: now,
            updated_at: now,
        };
        state.slots.push(created.clone());

        Ok(SlotInsert::Inserted(created))
    }

    async fn list_recurring_slots(&self) -> Result<Vec<RecurringSlot>> {
        Ok(self.lock()?.slots.clone())
    }

    async fn list_exceptions_on(&self, dates: &[NaiveDate]) -> Result<Vec<SlotException>> {
        Ok(self
            .lock()?
            .exceptions
            .iter()
            .filter(|exception| dates.contains(&exception.date))
            .cloned()
            .collect())
    }

    async fn apply_exception(
        &self,
        recurring_slot_id: Uuid,
        date: NaiveDate,
        change: ExceptionChange,
    ) -> Result<ExceptionWrite> {
        let mut state = self.lock()?;

        if !state.slots.iter().any(|slot| slot.id == recurring_slot_id) {
            return Ok(ExceptionWrite::UnknownSlot);
        }

        let now = Utc::now();
        let existing = state.exceptions.iter_mut().find(|exception| {
            exception.recurring_slot_id == recurring_slot_id && exception.date == date
        });

        if let Some(exception) = existing {
            match change {
                ExceptionChange::Override {
                    start_time,
                    end_time,
                } => {
                    exception.start_time = start_time.apply(exception.start_time);
                    exception.end_time = end_time.apply(exception.end_time);
                    exception.is_deleted = false;
                }
                ExceptionChange::Cancel => exception.is_deleted = true,
            }
            exception.updated_at = now;
            return Ok(ExceptionWrite::Updated(exception.clone()));
        }

        let (start_time, end_time, is_deleted) = match change {
            ExceptionChange::Override {
                start_time,
                end_time,
            } => (start_time.apply(None), end_time.apply(None), false),
            ExceptionChange::Cancel => (None, None, true),
        };
        let created = SlotException {
            id: Uuid::new_v4(),
            recurring_slot_id,
            date,
            start_time,
            end_time,
            is_deleted,
            created_at: now,
            updated_at: now,
        };
        state.exceptions.push(created.clone());

        Ok(ExceptionWrite::Created(created))
    }
}
