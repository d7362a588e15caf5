// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Garden scheduling engine: the job scheduler, the light cycle controller,
//! the water schedule engine and the runtime that ties them to storage

pub mod config;
mod error;
mod events;
pub mod light;
pub mod logging;
mod runtime;
pub mod scheduler;
pub mod water;

pub use config::{ConfigError, EngineConfig, HistoryConfig, LoggingConfig, SchedulerConfig};
pub use error::{JobError, LightError, RuntimeError, SchedulerError, WaterError, WeatherWarning};
pub use events::ResourceEvent;
pub use light::LightController;
pub use logging::{setup_logging, LoggingError};
pub use runtime::{MigrationSummary, Runtime, RuntimeDeps, StartupReport};
pub use scheduler::{action_fn, Job, JobAction, JobId, JobInfo, JobScheduler};
pub use water::{compute_effective_duration, ScaledDuration, WaterEngine};
