//! Storage port for recurring slots and their exceptions.
//!
//! Implementations must enforce both uniqueness invariants atomically: at most
//! [`MAX_SLOTS_PER_DAY`](crate::models::recurring_slot::MAX_SLOTS_PER_DAY)
//! recurring slots per weekday, and at most one exception per
//! `(recurring_slot_id, date)`. A read-then-write check in the caller is not
//! enough once requests run concurrently.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    exception::{ExceptionChange, SlotException},
    recurring_slot::{NewRecurringSlot, RecurringSlot},
};

/// Outcome of a conditional recurring-slot insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotInsert {
    Inserted(RecurringSlot),
    /// The weekday already holds its maximum number of slots
    Conflict,
}

/// Outcome of an exception upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionWrite {
    Created(SlotException),
    Updated(SlotException),
    /// The referenced recurring slot does not exist
    UnknownSlot,
}

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Inserts a slot unless its weekday is already full.
    async fn insert_recurring_slot(&self, slot: &NewRecurringSlot) -> Result<SlotInsert>;

    /// All recurring slots in creation order.
    async fn list_recurring_slots(&self) -> Result<Vec<RecurringSlot>>;

    /// Exceptions whose date is one of `dates`.
    async fn list_exceptions_on(&self, dates: &[NaiveDate]) -> Result<Vec<SlotException>>;

    /// Creates or updates the single exception row for `(recurring_slot_id, date)`.
    async fn apply_exception(
        &self,
        recurring_slot_id: Uuid,
        date: NaiveDate,
        change: ExceptionChange,
    ) -> Result<ExceptionWrite>;
}
