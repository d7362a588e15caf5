// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors for schedule records

use thiserror::Error;

/// A schedule record that cannot be scheduled as configured.
///
/// These are rejected when a schedule is constructed or installed and never
/// reach the job scheduler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must not be 0")]
    ZeroDuration(&'static str),
    #[error("light_schedule duration must be less than 24h, got {0}")]
    LightDurationTooLong(String),
    #[error("invalid start time {input:?}: {reason}")]
    InvalidStartTime { input: String, reason: String },
    #[error("{control}: factor must be between 0 and 1, got {factor}")]
    FactorOutOfRange { control: &'static str, factor: f64 },
    #[error("{control}: range must be a positive number, got {range}")]
    NonPositiveRange { control: &'static str, range: f64 },
    #[error("{0} is too long to schedule")]
    DurationOutOfRange(&'static str),
    #[error("active_period: start_month and end_month must be different")]
    EmptyActivePeriod,
}
