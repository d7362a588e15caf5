// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weather data sources used to scale watering

mod noop;

pub use noop::NoOpWeatherAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWeatherAdapter, WeatherCall};

use async_trait::async_trait;
use garden_core::ResourceId;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("weather client not configured: {0}")]
    NotConfigured(ResourceId),
    #[error("weather fetch failed: {0}")]
    FetchFailed(String),
}

/// Live weather measurements, keyed by the weather client that provides them
#[async_trait]
pub trait WeatherAdapter: Clone + Send + Sync + 'static {
    /// Total rainfall in millimeters over the last `since`
    async fn total_rain(&self, client_id: ResourceId, since: Duration) -> Result<f64, WeatherError>;

    /// Average daily high temperature in Celsius over the last `since`
    async fn average_high_temperature(
        &self,
        client_id: ResourceId,
        since: Duration,
    ) -> Result<f64, WeatherError>;
}
