// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake weather adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WeatherAdapter, WeatherError};
use async_trait::async_trait;
use garden_core::ResourceId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded weather fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherCall {
    TotalRain { client_id: ResourceId, since: Duration },
    AverageHighTemperature { client_id: ResourceId, since: Duration },
}

#[derive(Default)]
struct FakeWeatherState {
    rain: HashMap<ResourceId, Result<f64, WeatherError>>,
    temperature: HashMap<ResourceId, Result<f64, WeatherError>>,
    calls: Vec<WeatherCall>,
}

/// Fake weather adapter with canned per-client readings
#[derive(Clone, Default)]
pub struct FakeWeatherAdapter {
    inner: Arc<Mutex<FakeWeatherState>>,
}

impl FakeWeatherAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rain(&self, client_id: ResourceId, millimeters: f64) {
        self.lock().rain.insert(client_id, Ok(millimeters));
    }

    pub fn set_temperature(&self, client_id: ResourceId, celsius: f64) {
        self.lock().temperature.insert(client_id, Ok(celsius));
    }

    pub fn fail_rain(&self, client_id: ResourceId, error: WeatherError) {
        self.lock().rain.insert(client_id, Err(error));
    }

    pub fn fail_temperature(&self, client_id: ResourceId, error: WeatherError) {
        self.lock().temperature.insert(client_id, Err(error));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WeatherCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeWeatherState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl WeatherAdapter for FakeWeatherAdapter {
    async fn total_rain(&self, client_id: ResourceId, since: Duration) -> Result<f64, WeatherError> {
        let mut inner = self.lock();
        inner.calls.push(WeatherCall::TotalRain { client_id, since });
        inner
            .rain
            .get(&client_id)
            .cloned()
            .unwrap_or(Err(WeatherError::NotConfigured(client_id)))
    }

    async fn average_high_temperature(
        &self,
        client_id: ResourceId,
        since: Duration,
    ) -> Result<f64, WeatherError> {
        let mut inner = self.lock();
        inner
            .calls
            .push(WeatherCall::AverageHighTemperature { client_id, since });
        inner
            .temperature
            .get(&client_id)
            .cloned()
            .unwrap_or(Err(WeatherError::NotConfigured(client_id)))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
