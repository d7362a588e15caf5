// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{WeatherAdapter, WeatherError};
use async_trait::async_trait;
use garden_core::ResourceId;
use std::time::Duration;

/// Weather adapter with no clients; every fetch reports the client as
/// unconfigured so watering falls back to the unscaled duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpWeatherAdapter;

impl NoOpWeatherAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WeatherAdapter for NoOpWeatherAdapter {
    async fn total_rain(&self, client_id: ResourceId, _since: Duration) -> Result<f64, WeatherError> {
        Err(WeatherError::NotConfigured(client_id))
    }

    async fn average_high_temperature(
        &self,
        client_id: ResourceId,
        _since: Duration,
    ) -> Result<f64, WeatherError> {
        Err(WeatherError::NotConfigured(client_id))
    }
}
