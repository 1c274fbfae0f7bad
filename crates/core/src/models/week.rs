use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::time::hhmm;

/// One concrete occurrence of a recurring slot on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedSlot {
    /// Identifier of the recurring slot this occurrence comes from
    pub id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    /// Set when an override exception shaped this occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_id: Option<Uuid>,
}

/// Effective slots for each of the seven dates of a week, in date order.
pub type WeekSchedule = BTreeMap<NaiveDate, Vec<MaterializedSlot>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekQuery {
    pub start: Option<String>,
}
