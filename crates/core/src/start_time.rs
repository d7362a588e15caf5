// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-of-day with a fixed UTC offset and no date component

use crate::error::ValidationError;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a daily light cycle begins, e.g. `"22:00:00-07:00"` or `"06:30:00Z"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl StartTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolve this time of day on the calendar date of `now`, as seen in the
    /// start time's own offset, and return it in UTC.
    pub fn on_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.offset).date_naive();
        let local = local_date.and_time(self.time);
        let utc = local - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, Utc)
    }
}

impl FromStr for StartTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidStartTime {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let normalized = match s.strip_suffix('Z') {
            Some(rest) => format!("{rest}+00:00"),
            None => s.to_string(),
        };
        // Borrow a fixed date so chrono can parse the offset alongside the time
        let parsed =
            DateTime::parse_from_str(&format!("1970-01-01T{normalized}"), "%Y-%m-%dT%H:%M:%S%:z")
                .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            time: parsed.time(),
            offset: *parsed.offset(),
        })
    }
}

impl TryFrom<String> for StartTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StartTime> for String {
    fn from(value: StartTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H:%M:%S"))?;
        if self.offset.local_minus_utc() == 0 {
            write!(f, "Z")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

#[cfg(test)]
#[path = "start_time_tests.rs"]
mod tests;
