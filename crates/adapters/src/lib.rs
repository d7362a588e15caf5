// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Collaborators of the garden engine: controller dispatch, weather data,
//! watering history and record storage

pub mod dispatch;
pub mod history;
pub mod storage;
pub mod traced;
pub mod weather;

pub use dispatch::{DispatchAdapter, DispatchError, NoOpDispatchAdapter};
pub use history::{HistoryAdapter, HistoryError, NoOpHistoryAdapter};
pub use storage::{MemoryRecordStore, RecordStore, StorageError};
pub use traced::{TracedDispatchAdapter, TracedWeatherAdapter};
pub use weather::{NoOpWeatherAdapter, WeatherAdapter, WeatherError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use dispatch::{DispatchCall, FakeDispatchAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use history::FakeHistoryAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use weather::{FakeWeatherAdapter, WeatherCall};
