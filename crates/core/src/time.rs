//! Calendar helpers shared by the service, the materializer and the wire models.
//!
//! Dates and times are naive local values. Times carry minute precision and
//! are written as `HH:MM`.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    errors::{SlotError, SlotResult},
    models::exception::TimeChange,
};

/// Highest valid `day_of_week` value.
pub const MAX_DAY_OF_WEEK: i16 = 6;

/// Number of dates in a materialized week.
pub const DAYS_PER_WEEK: u64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

/// Which real weekday `day_of_week = 0` refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayNumbering {
    /// 0 = Sunday ... 6 = Saturday
    #[default]
    Sunday,
    /// 0 = Monday ... 6 = Sunday
    Monday,
}

impl WeekdayNumbering {
    /// Returns the `day_of_week` number of a calendar date.
    pub fn day_of_week(self, date: NaiveDate) -> i16 {
        let days = match self {
            WeekdayNumbering::Sunday => date.weekday().num_days_from_sunday(),
            WeekdayNumbering::Monday => date.weekday().num_days_from_monday(),
        };
        days as i16
    }
}

impl FromStr for WeekdayNumbering {
    type Err = SlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(WeekdayNumbering::Sunday),
            "monday" => Ok(WeekdayNumbering::Monday),
            other => Err(SlotError::Validation(format!(
                "Unknown week start day '{}', expected 'sunday' or 'monday'",
                other
            ))),
        }
    }
}

impl fmt::Display for WeekdayNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekdayNumbering::Sunday => f.write_str("sunday"),
            WeekdayNumbering::Monday => f.write_str("monday"),
        }
    }
}

/// Checks that a raw `day_of_week` lies in `0..=6`.
pub fn validate_day_of_week(day_of_week: i64) -> SlotResult<i16> {
    if (0..=i64::from(MAX_DAY_OF_WEEK)).contains(&day_of_week) {
        Ok(day_of_week as i16)
    } else {
        Err(SlotError::Validation(format!(
            "Invalid day_of_week {}: must be between 0 and {}",
            day_of_week, MAX_DAY_OF_WEEK
        )))
    }
}

/// Parses a `YYYY-MM-DD` date. `field` names the input in the error message.
pub fn parse_date(field: &str, value: &str) -> SlotResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        SlotError::Validation(format!(
            "Invalid {}: expected YYYY-MM-DD, got '{}'",
            field, value
        ))
    })
}

/// Parses `HH:MM` or `HH:MM:SS`, dropping seconds.
pub fn parse_time(field: &str, value: &str) -> SlotResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT_WITH_SECONDS))
        .map(truncate_to_minute)
        .map_err(|_| {
            SlotError::Validation(format!("Invalid {}: expected HH:MM, got '{}'", field, value))
        })
}

/// Parses an optional time field; `None` and blank strings both mean "not given".
pub fn parse_optional_time(field: &str, value: Option<&str>) -> SlotResult<Option<NaiveTime>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_time(field, raw).map(Some),
    }
}

/// Turns a raw override field into a [`TimeChange`]. `null` and blank clear it.
pub fn parse_time_change(field: &str, value: Option<Option<&str>>) -> SlotResult<TimeChange> {
    match value {
        None => Ok(TimeChange::Keep),
        Some(raw) => Ok(match parse_optional_time(field, raw)? {
            Some(time) => TimeChange::Set(time),
            None => TimeChange::Clear,
        }),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Serde adapter writing `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time("time", &raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(time) => serializer.serialize_some(&super::super::format_time(*time)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            super::super::parse_optional_time("time", raw.as_deref())
                .map_err(serde::de::Error::custom)
        }
    }
}

/// Keeps `null` apart from a missing field.
///
/// Pair with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
