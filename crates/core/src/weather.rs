// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weather-driven duration scaling
//!
//! A [`ScaleControl`] turns a measured value into a multiplier for a watering
//! duration. With a baseline of 90, a factor of 0.5 and a range of 30, a 30m
//! schedule waters between 15m and 45m:
//!
//! - 100 => `(100 - 90) / 30 * 0.5 + 1 = 1.1667`, water 35m
//! - 120 => `1.5`, the maximum
//! - 130 => clamped to `1.5`
//! - 60  => `0.5`, the minimum

use crate::error::ValidationError;
use crate::id::ResourceId;
use serde::{Deserialize, Serialize};

/// Scaling parameters shared by the symmetric and down-only variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleControl {
    /// Value at which no scaling happens
    pub baseline_value: f64,
    /// Maximum proportion to scale by, in `[0, 1]`
    pub factor: f64,
    /// Distance from the baseline at which scaling saturates
    pub range: f64,
    /// Weather source providing the measurements
    pub client_id: ResourceId,
}

impl ScaleControl {
    pub fn new(baseline_value: f64, factor: f64, range: f64, client_id: ResourceId) -> Self {
        Self {
            baseline_value,
            factor,
            range,
            client_id,
        }
    }

    /// Scale up above the baseline and down below it, within `1 ± factor`.
    pub fn scale(&self, value: f64) -> f64 {
        let diff = (value - self.baseline_value).clamp(-self.range, self.range);
        (diff / self.range) * self.factor + 1.0
    }

    /// Only ever scale down, reaching `factor` at `baseline + range`.
    ///
    /// Values at or below the baseline return 1.
    pub fn inverted_scale_down_only(&self, value: f64) -> f64 {
        if value < self.baseline_value {
            return 1.0;
        }
        let diff = (value - self.baseline_value).clamp(0.0, self.range);
        1.0 - (diff / self.range) * (1.0 - self.factor)
    }

    /// Reject factors outside `[0, 1]` and non-positive ranges
    pub fn validate(&self, control: &'static str) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.factor) {
            return Err(ValidationError::FactorOutOfRange {
                control,
                factor: self.factor,
            });
        }
        if self.range.is_nan() || self.range <= 0.0 {
            return Err(ValidationError::NonPositiveRange {
                control,
                range: self.range,
            });
        }
        Ok(())
    }
}

/// Weather inputs that adjust a water schedule's duration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherControl {
    /// Recent rainfall (mm) reduces watering
    #[serde(default, rename = "rain_control", skip_serializing_if = "Option::is_none")]
    pub rain: Option<ScaleControl>,
    /// Average daily high temperature (°C) scales watering both ways
    #[serde(
        default,
        rename = "temperature_control",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<ScaleControl>,
}

impl WeatherControl {
    pub fn is_empty(&self) -> bool {
        self.rain.is_none() && self.temperature.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(temperature) = &self.temperature {
            temperature.validate("temperature_control")?;
        }
        if let Some(rain) = &self.rain {
            rain.validate("rain_control")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "weather_tests.rs"]
mod tests;
