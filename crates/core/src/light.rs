// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Light schedules and light actions

use crate::error::ValidationError;
use crate::recurrence::{previous_occurrence, to_delta};
use crate::start_time::StartTime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Light cycles recur daily
pub const LIGHT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// State requested of (or derived for) a garden light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LightState {
    Off,
    On,
    /// Flip whatever the controller currently has
    Toggle,
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightState::Off => write!(f, "OFF"),
            LightState::On => write!(f, "ON"),
            LightState::Toggle => write!(f, ""),
        }
    }
}

impl FromStr for LightState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(LightState::Off),
            "ON" => Ok(LightState::On),
            "" => Ok(LightState::Toggle),
            _ => Err(format!("unknown light state: {}", s)),
        }
    }
}

impl TryFrom<String> for LightState {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LightState> for String {
    fn from(value: LightState) -> Self {
        value.to_string()
    }
}

/// Daily ON/OFF cycle for a garden light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSchedule {
    /// How long the light stays ON each cycle
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// When the ON period begins
    pub start_time: StartTime,
    /// Overrides the next ON transition exactly once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adhoc_on_time: Option<DateTime<Utc>>,
}

impl LightSchedule {
    pub fn new(duration: Duration, start_time: StartTime) -> Self {
        Self {
            duration,
            start_time,
            adhoc_on_time: None,
        }
    }

    pub fn with_adhoc_on_time(mut self, at: DateTime<Utc>) -> Self {
        self.adhoc_on_time = Some(at);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.duration.is_zero() {
            return Err(ValidationError::ZeroDuration("light_schedule duration"));
        }
        if self.duration >= LIGHT_INTERVAL {
            return Err(ValidationError::LightDurationTooLong(
                humantime::format_duration(self.duration).to_string(),
            ));
        }
        Ok(())
    }

    /// The state the light should be in at `now` according to the regular
    /// cycle alone, ignoring overrides and delays.
    pub fn state_at(&self, now: DateTime<Utc>) -> LightState {
        let anchor = self.start_time.on_date(now);
        let last_on = previous_occurrence(anchor, LIGHT_INTERVAL, now);
        if now < last_on + to_delta(self.duration) {
            LightState::On
        } else {
            LightState::Off
        }
    }
}

/// One-shot request to change a garden light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightAction {
    pub state: LightState,
    /// Keep the light OFF this much longer than scheduled (OFF only)
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<Duration>,
}

impl LightAction {
    pub fn new(state: LightState) -> Self {
        Self {
            state,
            for_duration: None,
        }
    }

    pub fn off_for(duration: Duration) -> Self {
        Self {
            state: LightState::Off,
            for_duration: Some(duration),
        }
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
