// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Water schedules

use crate::error::ValidationError;
use crate::id::ResourceId;
use crate::migrate::{IncrementVersion, Versioned};
use crate::record::Record;
use crate::recurrence::checked_add;
use crate::weather::WeatherControl;
use chrono::{DateTime, Datelike, Month, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version stamped on newly created water schedules
pub const CURRENT_WATER_SCHEDULE_VERSION: u32 = 1;

/// Recurring watering of one or more zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSchedule {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// How long to water
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// Time between waterings
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Anchors the phase of the recurrence
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_control: Option<WeatherControl>,
    /// Months during which the schedule waters; always active when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_period: Option<ActivePeriod>,
    #[serde(default)]
    pub version: u32,
}

impl WaterSchedule {
    pub fn new(
        id: ResourceId,
        duration: Duration,
        interval: Duration,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: String::new(),
            duration,
            interval,
            start_time,
            end_date: None,
            weather_control: None,
            active_period: None,
            version: CURRENT_WATER_SCHEDULE_VERSION,
        }
    }

    pub fn with_weather_control(mut self, control: WeatherControl) -> Self {
        self.weather_control = Some(control);
        self
    }

    pub fn with_active_period(mut self, period: ActivePeriod) -> Self {
        self.active_period = Some(period);
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// True when at least one weather control is configured
    pub fn has_weather_control(&self) -> bool {
        self.weather_control
            .as_ref()
            .is_some_and(|control| !control.is_empty())
    }

    /// Whether watering should happen at `now` given the active period
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.active_period
            .as_ref()
            .is_none_or(|period| period.contains(now))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration.is_zero() {
            return Err(ValidationError::ZeroDuration("duration"));
        }
        if self.interval.is_zero() {
            return Err(ValidationError::ZeroDuration("interval"));
        }
        if checked_add(self.start_time, self.interval).is_none() {
            return Err(ValidationError::DurationOutOfRange("interval"));
        }
        if let Some(control) = &self.weather_control {
            control.validate()?;
        }
        if let Some(period) = &self.active_period {
            period.validate()?;
        }
        Ok(())
    }
}

impl Record for WaterSchedule {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

impl Versioned for WaterSchedule {
    fn version(&self) -> u32 {
        self.version
    }

    fn as_increment_version(&mut self) -> Option<&mut dyn IncrementVersion> {
        Some(self)
    }
}

impl IncrementVersion for WaterSchedule {
    fn set_version(&mut self, version: u32) {
        self.version = version;
    }
}

/// Inclusive range of months, which may wrap the year (e.g. November to February)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePeriod {
    pub start_month: Month,
    pub end_month: Month,
}

impl ActivePeriod {
    pub fn new(start_month: Month, end_month: Month) -> Self {
        Self {
            start_month,
            end_month,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_month == self.end_month {
            return Err(ValidationError::EmptyActivePeriod);
        }
        Ok(())
    }

    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let month = now.month();
        let start = self.start_month.number_from_month();
        let end = self.end_month.number_from_month();
        if start <= end {
            (start..=end).contains(&month)
        } else {
            month >= start || month <= end
        }
    }

    /// Midnight UTC on the first day of the next `start_month` at or after `after`
    pub fn next_start(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let month = self.start_month.number_from_month();
        let mut year = after.year();
        loop {
            let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
            if start >= after {
                return Some(start);
            }
            year = year.checked_add(1)?;
        }
    }
}

#[cfg(test)]
#[path = "water_tests.rs"]
mod tests;
