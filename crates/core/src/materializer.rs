//! # Week Materializer
//!
//! Resolves the weekly template plus date-specific exceptions into the
//! effective slots of seven consecutive dates.
//!
//! For every date the recurring slots of that weekday are visited in the
//! order the store returned them, and the exception keyed by
//! `(slot id, date)` decides the outcome:
//!
//! 1. no exception: the slot's own times
//! 2. cancelled exception: nothing
//! 3. override exception: each of start and end falls back to the slot's
//!    value independently when the override leaves it empty
//!
//! The functions here are pure; loading data is the caller's job.

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    models::{
        exception::SlotException,
        recurring_slot::RecurringSlot,
        week::{MaterializedSlot, WeekSchedule},
    },
    time::{DAYS_PER_WEEK, WeekdayNumbering},
};

/// The dates `week_start ..= week_start + 6 days`.
///
/// The start date is used as given; it is not snapped to any particular weekday.
pub fn week_dates(week_start: NaiveDate) -> SlotResult<Vec<NaiveDate>> {
    (0..DAYS_PER_WEEK)
        .map(|offset| {
            week_start.checked_add_days(Days::new(offset)).ok_or_else(|| {
                SlotError::Validation(format!(
                    "Week starting {} runs past the supported calendar range",
                    week_start
                ))
            })
        })
        .collect()
}

/// Builds the schedule for the week starting at `week_start`.
///
/// Every one of the seven dates is present in the result, with an empty list
/// when nothing applies. Exceptions for dates outside the week are ignored.
pub fn materialize_week(
    week_start: NaiveDate,
    numbering: WeekdayNumbering,
    slots: &[RecurringSlot],
    exceptions: &[SlotException],
) -> SlotResult<WeekSchedule> {
    let dates = week_dates(week_start)?;

    let by_occurrence: HashMap<(Uuid, NaiveDate), &SlotException> = exceptions
        .iter()
        .map(|exception| ((exception.recurring_slot_id, exception.date), exception))
        .collect();

    let mut week = WeekSchedule::new();
    for date in dates {
        let day_of_week = numbering.day_of_week(date);
        let occurrences = slots
            .iter()
            .filter(|slot| slot.day_of_week == day_of_week)
            .filter_map(|slot| {
                let exception = by_occurrence.get(&(slot.id, date)).copied();
                resolve_occurrence(slot, date, exception)
            })
            .collect();
        week.insert(date, occurrences);
    }

    Ok(week)
}

/// Applies at most one exception to one occurrence of `slot` on `date`.
pub fn resolve_occurrence(
    slot: &RecurringSlot,
    date: NaiveDate,
    exception: Option<&SlotException>,
) -> Option<MaterializedSlot> {
    match exception {
        None => Some(MaterializedSlot {
            id: slot.id,
            day_of_week: slot.day_of_week,
            start_time: slot.start_time,
            end_time: slot.end_time,
            date,
            exception_id: None,
        }),
        Some(exception) if exception.is_deleted => None,
        Some(exception) => Some(MaterializedSlot {
            id: slot.id,
            day_of_week: slot.day_of_week,
            start_time: exception.start_time.unwrap_or(slot.start_time),
            end_time: exception.end_time.unwrap_or(slot.end_time),
            date,
            exception_id: Some(exception.id),
        }),
    }
}
