// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! garden-core: domain model for the garden scheduling engine
//!
//! This crate provides:
//! - Light, water, garden and zone records with their validation rules
//! - Recurrence math and weather scale functions
//! - The watering history reducer
//! - The versioned migration pipeline

pub mod clock;
pub mod error;
pub mod garden;
pub mod history;
pub mod id;
pub mod light;
pub mod migrate;
pub mod record;
pub mod recurrence;
pub mod start_time;
pub mod water;
pub mod weather;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::ValidationError;
pub use garden::{Garden, NotificationSettings, Zone};
pub use history::{
    calculate_progress, ProgressError, WaterHistory, WaterHistoryProgress, WaterStatus,
};
pub use id::{IdGen, ResourceId, SequentialIdGen, UuidIdGen};
pub use light::{LightAction, LightSchedule, LightState, LIGHT_INTERVAL};
pub use migrate::{IncrementVersion, MigrateError, Migrations, Versioned};
pub use record::{Record, RecordFilter};
pub use start_time::StartTime;
pub use water::{ActivePeriod, WaterSchedule};
pub use weather::{ScaleControl, WeatherControl};
