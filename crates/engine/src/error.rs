// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use garden_adapters::{DispatchError, HistoryError, StorageError, WeatherError};
use garden_core::{ResourceId, ValidationError};
use thiserror::Error;

/// Errors from registering jobs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("job interval must be positive")]
    NonPositiveInterval,
    #[error("job interval reaches past the representable calendar")]
    IntervalOutOfRange,
    #[error("scheduler is stopped")]
    Stopped,
}

/// Failure of a job while it runs; logged, never fatal to the scheduler
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the light cycle controller
#[derive(Debug, Error)]
pub enum LightError {
    #[error("unable to use delay when state is not OFF")]
    DelayStateNotOff,
    #[error("delay requires for_duration")]
    MissingDelay,
    #[error("unable to execute delay that lasts longer than light_schedule")]
    DelayTooLong,
    #[error("unable to schedule delay that extends past the light turning back on")]
    DelayPastNextOff,
    #[error("garden {0} has no light_schedule")]
    NoLightSchedule(ResourceId),
    #[error("invalid light_schedule: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("unable to send light action: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors from the water schedule engine
#[derive(Debug, Error)]
pub enum WaterError {
    #[error("invalid water schedule: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// A weather reading that could not be used; the duration is left unscaled
/// by the affected control
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherWarning {
    #[error("unable to get average high temperature: {0}")]
    Temperature(WeatherError),
    #[error("unable to get total rain: {0}")]
    Rain(WeatherError),
    #[error("{control} produced an invalid scale factor from {value}")]
    InvalidScale { control: &'static str, value: f64 },
}

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("garden not found: {0}")]
    GardenNotFound(ResourceId),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("history error: {0}")]
    History(#[from] HistoryError),
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Light(#[from] LightError),
    #[error(transparent)]
    Water(#[from] WaterError),
}
