//! # Slot Service
//!
//! The mutation gateway and read entry point used by the HTTP layer. It
//! parses and validates raw request values, calls the injected
//! [`SlotStore`], and turns store outcomes into [`SlotError`] variants.
//! Invariants themselves are enforced by the store.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    materializer,
    models::{
        exception::{ExceptionChange, ExceptionOutcome, UpsertExceptionRequest},
        recurring_slot::{CreateSlotRequest, MAX_SLOTS_PER_DAY, NewRecurringSlot, RecurringSlot},
        week::WeekSchedule,
    },
    store::{ExceptionWrite, SlotInsert, SlotStore},
    time::{self, WeekdayNumbering},
};

#[derive(Clone)]
pub struct SlotService {
    store: Arc<dyn SlotStore>,
    numbering: WeekdayNumbering,
}

impl SlotService {
    pub fn new(store: Arc<dyn SlotStore>, numbering: WeekdayNumbering) -> Self {
        Self { store, numbering }
    }

    pub fn numbering(&self) -> WeekdayNumbering {
        self.numbering
    }

    /// Creates a recurring slot.
    ///
    /// # Errors
    ///
    /// * `Validation` - `day_of_week` outside `0..=6` or a malformed time
    /// * `CapacityExceeded` - the weekday already holds two slots
    pub async fn create_slot(&self, request: &CreateSlotRequest) -> SlotResult<RecurringSlot> {
        let new_slot = NewRecurringSlot {
            day_of_week: time::validate_day_of_week(request.day_of_week)?,
            start_time: time::parse_time("start_time", &request.start_time)?,
            end_time: time::parse_time("end_time", &request.end_time)?,
        };

        match self.store.insert_recurring_slot(&new_slot).await? {
            SlotInsert::Inserted(slot) => {
                debug!(
                    "Created recurring slot: id={}, day_of_week={}",
                    slot.id, slot.day_of_week
                );
                Ok(slot)
            }
            SlotInsert::Conflict => Err(SlotError::CapacityExceeded(format!(
                "Maximum {} slots allowed per day",
                MAX_SLOTS_PER_DAY
            ))),
        }
    }

    /// Materializes the week whose first date is the raw `start` value.
    pub async fn week(&self, start: Option<&str>) -> SlotResult<WeekSchedule> {
        let start = required("start", start)?;
        let week_start = time::parse_date("start", start)?;
        self.materialize_week(week_start).await
    }

    /// Reads both stores and resolves the seven dates from `week_start`.
    pub async fn materialize_week(&self, week_start: NaiveDate) -> SlotResult<WeekSchedule> {
        let dates = materializer::week_dates(week_start)?;
        let slots = self.store.list_recurring_slots().await?;
        let exceptions = self.store.list_exceptions_on(&dates).await?;

        materializer::materialize_week(week_start, self.numbering, &slots, &exceptions)
    }

    /// Overrides the times of one occurrence, un-cancelling it if needed.
    ///
    /// A time field left out of the request keeps its stored value; `null`
    /// clears it.
    pub async fn upsert_exception(
        &self,
        recurring_slot_id: Uuid,
        request: &UpsertExceptionRequest,
    ) -> SlotResult<ExceptionOutcome> {
        let date = time::parse_date("date", required("date", request.date.as_deref())?)?;
        let change = ExceptionChange::Override {
            start_time: time::parse_time_change(
                "start_time",
                request.start_time.as_ref().map(Option::as_deref),
            )?,
            end_time: time::parse_time_change(
                "end_time",
                request.end_time.as_ref().map(Option::as_deref),
            )?,
        };

        self.apply_exception(recurring_slot_id, date, change).await
    }

    /// Cancels one occurrence of a recurring slot.
    pub async fn delete_exception(
        &self,
        recurring_slot_id: Uuid,
        date: Option<&str>,
    ) -> SlotResult<ExceptionOutcome> {
        let date = time::parse_date("date", required("date", date)?)?;
        self.apply_exception(recurring_slot_id, date, ExceptionChange::Cancel)
            .await
    }

    async fn apply_exception(
        &self,
        recurring_slot_id: Uuid,
        date: NaiveDate,
        change: ExceptionChange,
    ) -> SlotResult<ExceptionOutcome> {
        let outcome = match self
            .store
            .apply_exception(recurring_slot_id, date, change)
            .await?
        {
            ExceptionWrite::Created(exception) => ExceptionOutcome {
                created: true,
                exception,
            },
            ExceptionWrite::Updated(exception) => ExceptionOutcome {
                created: false,
                exception,
            },
            ExceptionWrite::UnknownSlot => {
                return Err(SlotError::NotFound(format!(
                    "Slot with ID {} not found",
                    recurring_slot_id
                )));
            }
        };

        debug!(
            "Applied exception: slot={}, date={}, cancel={}, created={}",
            recurring_slot_id,
            date,
            change.is_cancel(),
            outcome.created
        );
        Ok(outcome)
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> SlotResult<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SlotError::Validation(format!("{} is required", field))),
    }
}
