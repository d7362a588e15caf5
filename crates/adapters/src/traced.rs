// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::dispatch::{DispatchAdapter, DispatchError};
use crate::weather::{WeatherAdapter, WeatherError};
use async_trait::async_trait;
use garden_core::{LightState, ResourceId, Zone};
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Wrapper that adds tracing to any DispatchAdapter
#[derive(Clone)]
pub struct TracedDispatchAdapter<D> {
    inner: D,
}

impl<D> TracedDispatchAdapter<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

fn log_dispatch(result: &Result<(), DispatchError>, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(()) => tracing::info!(elapsed_ms, "sent"),
        Err(e) => tracing::error!(elapsed_ms, error = %e, "send failed"),
    }
}

#[async_trait]
impl<D: DispatchAdapter> DispatchAdapter for TracedDispatchAdapter<D> {
    async fn send_water_action(&self, zone: &Zone, duration: Duration) -> Result<(), DispatchError> {
        let span = tracing::info_span!(
            "dispatch.water",
            garden_id = %zone.garden_id,
            zone_id = %zone.id,
            position = zone.position,
            duration = %humantime::format_duration(duration)
        );
        async {
            let start = Instant::now();
            let result = self.inner.send_water_action(zone, duration).await;
            log_dispatch(&result, start);
            result
        }
        .instrument(span)
        .await
    }

    async fn send_light_action(
        &self,
        garden_id: ResourceId,
        state: LightState,
        for_duration: Option<Duration>,
    ) -> Result<(), DispatchError> {
        let span = tracing::info_span!(
            "dispatch.light",
            %garden_id,
            %state,
            for_duration = ?for_duration
        );
        async {
            let start = Instant::now();
            let result = self
                .inner
                .send_light_action(garden_id, state, for_duration)
                .await;
            log_dispatch(&result, start);
            result
        }
        .instrument(span)
        .await
    }

    async fn send_stop_action(&self, garden_id: ResourceId, all: bool) -> Result<(), DispatchError> {
        let span = tracing::info_span!("dispatch.stop", %garden_id, all);
        async {
            let start = Instant::now();
            let result = self.inner.send_stop_action(garden_id, all).await;
            log_dispatch(&result, start);
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any WeatherAdapter
#[derive(Clone)]
pub struct TracedWeatherAdapter<W> {
    inner: W,
}

impl<W> TracedWeatherAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

fn log_reading(result: &Result<f64, WeatherError>, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => tracing::debug!(elapsed_ms, value, "fetched"),
        // Callers fall back to unscaled durations
        Err(e) => tracing::warn!(elapsed_ms, error = %e, "fetch failed"),
    }
}

#[async_trait]
impl<W: WeatherAdapter> WeatherAdapter for TracedWeatherAdapter<W> {
    async fn total_rain(&self, client_id: ResourceId, since: Duration) -> Result<f64, WeatherError> {
        let span = tracing::info_span!("weather.rain", %client_id);
        async {
            let start = Instant::now();
            let result = self.inner.total_rain(client_id, since).await;
            log_reading(&result, start);
            result
        }
        .instrument(span)
        .await
    }

    async fn average_high_temperature(
        &self,
        client_id: ResourceId,
        since: Duration,
    ) -> Result<f64, WeatherError> {
        let span = tracing::info_span!("weather.temperature", %client_id);
        async {
            let start = Instant::now();
            let result = self.inner.average_high_temperature(client_id, since).await;
            log_reading(&result, start);
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
