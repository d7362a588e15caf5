// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Water schedule engine
//!
//! Each active water schedule owns one recurring `WATER` job tagged with the
//! schedule id. When it fires, the watering duration is scaled by live
//! weather data and sent to the controller of every zone using the schedule.

use crate::error::{JobError, WaterError, WeatherWarning};
use crate::scheduler::{Job, JobAction, JobScheduler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use garden_adapters::{DispatchAdapter, RecordStore, StorageError, WeatherAdapter};
use garden_core::recurrence::next_occurrence;
use garden_core::{Clock, Record, RecordFilter, ResourceId, WaterSchedule, Zone};
use std::time::Duration;

pub const WATER_LABEL: &str = "WATER";

/// Upper bound on active-period jumps when looking for the next watering
const MAX_ACTIVE_PERIOD_SEARCH: usize = 64;

/// A watering duration after weather scaling
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledDuration {
    pub duration: Duration,
    /// Product of every weather factor that could be applied
    pub scale_factor: f64,
    /// Weather readings that were skipped
    pub warnings: Vec<WeatherWarning>,
}

impl ScaledDuration {
    fn unscaled(duration: Duration) -> Self {
        Self {
            duration,
            scale_factor: 1.0,
            warnings: Vec::new(),
        }
    }
}

/// Scale `ws.duration` by its weather controls.
///
/// Fetch failures and unusable readings leave the duration unscaled by that
/// control and are returned as warnings. Weather is read over the last
/// `ws.interval`.
pub async fn compute_effective_duration<W: WeatherAdapter>(
    weather: &W,
    ws: &WaterSchedule,
) -> ScaledDuration {
    let Some(control) = ws.weather_control.as_ref().filter(|c| !c.is_empty()) else {
        return ScaledDuration::unscaled(ws.duration);
    };

    let mut scale_factor = 1.0;
    let mut warnings = Vec::new();

    if let Some(temperature) = &control.temperature {
        match weather
            .average_high_temperature(temperature.client_id, ws.interval)
            .await
        {
            Ok(celsius) => {
                let factor = temperature.scale(celsius);
                if factor.is_finite() {
                    scale_factor *= factor;
                } else {
                    warnings.push(WeatherWarning::InvalidScale {
                        control: "temperature",
                        value: celsius,
                    });
                }
            }
            Err(e) => warnings.push(WeatherWarning::Temperature(e)),
        }
    }

    if let Some(rain) = &control.rain {
        match weather.total_rain(rain.client_id, ws.interval).await {
            Ok(millimeters) => {
                let factor = rain.inverted_scale_down_only(millimeters);
                if factor.is_finite() {
                    scale_factor *= factor;
                } else {
                    warnings.push(WeatherWarning::InvalidScale {
                        control: "rain",
                        value: millimeters,
                    });
                }
            }
            Err(e) => warnings.push(WeatherWarning::Rain(e)),
        }
    }

    for warning in &warnings {
        tracing::warn!(water_schedule_id = %ws.id, %warning, "weather scaling skipped");
    }

    ScaledDuration {
        duration: scale(ws.duration, scale_factor),
        scale_factor,
        warnings,
    }
}

/// Multiply by `factor`, rounded to the millisecond
fn scale(duration: Duration, factor: f64) -> Duration {
    let millis = (duration.as_millis() as f64 * factor).round();
    // `as` saturates, and NaN becomes 0
    Duration::from_millis(millis.max(0.0) as u64)
}

/// Active zones listing `water_schedule_id`
async fn zones_using<Z: RecordStore<Zone>>(
    zones: &Z,
    water_schedule_id: ResourceId,
    now: DateTime<Utc>,
) -> Result<Vec<Zone>, StorageError> {
    Ok(zones
        .get_all(RecordFilter::Active { now })
        .await?
        .into_iter()
        .filter(|zone| zone.water_schedule_ids.contains(&water_schedule_id))
        .collect())
}

/// Sends one watering of a schedule to each of its zones when fired
struct WaterJob<D, W, Z, C> {
    ws: WaterSchedule,
    dispatch: D,
    weather: W,
    zones: Z,
    clock: C,
}

#[async_trait]
impl<D, W, Z, C> JobAction for WaterJob<D, W, Z, C>
where
    D: DispatchAdapter,
    W: WeatherAdapter,
    Z: RecordStore<Zone>,
    C: Clock,
{
    /// A zone that cannot be reached is logged and the rest still water
    async fn run(&self) -> Result<(), JobError> {
        let ws = &self.ws;
        let now = self.clock.now();
        if ws.is_end_dated(now) {
            tracing::info!(water_schedule_id = %ws.id, "water schedule is end-dated, skipping");
            return Ok(());
        }
        if !ws.is_active(now) {
            tracing::info!(water_schedule_id = %ws.id, "water schedule is outside its active period, skipping");
            return Ok(());
        }

        let zones = zones_using(&self.zones, ws.id, now).await?;
        if zones.is_empty() {
            tracing::info!(water_schedule_id = %ws.id, "no zones use water schedule, skipping");
            return Ok(());
        }

        let scaled = compute_effective_duration(&self.weather, ws).await;
        if scaled.duration.is_zero() {
            tracing::info!(
                water_schedule_id = %ws.id,
                scale_factor = scaled.scale_factor,
                "scaled duration is zero, skipping"
            );
            return Ok(());
        }

        tracing::info!(
            water_schedule_id = %ws.id,
            duration = %humantime::format_duration(scaled.duration),
            scale_factor = scaled.scale_factor,
            zones = zones.len(),
            "executing water action"
        );
        for zone in &zones {
            if let Err(e) = self.dispatch.send_water_action(zone, scaled.duration).await {
                tracing::error!(
                    water_schedule_id = %ws.id,
                    zone_id = %zone.id,
                    error = %e,
                    "unable to send water action"
                );
            }
        }
        Ok(())
    }
}

/// Keeps one recurring watering job per water schedule
pub struct WaterEngine<D, W, Z, C> {
    scheduler: JobScheduler<C>,
    dispatch: D,
    weather: W,
    zones: Z,
    clock: C,
}

impl<D: Clone, W: Clone, Z: Clone, C: Clone> Clone for WaterEngine<D, W, Z, C> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            dispatch: self.dispatch.clone(),
            weather: self.weather.clone(),
            zones: self.zones.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<D, W, Z, C> WaterEngine<D, W, Z, C>
where
    D: DispatchAdapter,
    W: WeatherAdapter,
    Z: RecordStore<Zone>,
    C: Clock,
{
    pub fn new(scheduler: JobScheduler<C>, dispatch: D, weather: W, zones: Z, clock: C) -> Self {
        Self {
            scheduler,
            dispatch,
            weather,
            zones,
            clock,
        }
    }

    /// Install or replace the watering job for `ws`.
    ///
    /// An end-dated schedule only has its job removed. The first fire is
    /// `ws.start_time` when that is still ahead, otherwise the next interval
    /// boundary after now.
    pub fn schedule_water_action(&self, ws: &WaterSchedule) -> Result<(), WaterError> {
        ws.validate()?;
        let now = self.clock.now();
        if ws.is_end_dated(now) {
            self.scheduler.remove_by_tag(ws.id);
            tracing::info!(water_schedule_id = %ws.id, "water schedule is end-dated, not scheduling");
            return Ok(());
        }

        let first_run = if ws.start_time > now {
            ws.start_time
        } else {
            next_occurrence(ws.start_time, ws.interval, now)
        };
        let job = WaterJob {
            ws: ws.clone(),
            dispatch: self.dispatch.clone(),
            weather: self.weather.clone(),
            zones: self.zones.clone(),
            clock: self.clock.clone(),
        };
        self.scheduler.replace(
            ws.id,
            vec![Job::every(ws.interval, first_run, job).with_label(WATER_LABEL)],
        )?;

        tracing::info!(
            water_schedule_id = %ws.id,
            %first_run,
            interval = %humantime::format_duration(ws.interval),
            "scheduled water action"
        );
        Ok(())
    }

    pub fn remove_water_action(&self, water_schedule_id: ResourceId) {
        self.scheduler.remove_by_tag(water_schedule_id);
        tracing::info!(%water_schedule_id, "removed water action");
    }

    pub async fn compute_effective_duration(&self, ws: &WaterSchedule) -> ScaledDuration {
        compute_effective_duration(&self.weather, ws).await
    }

    /// Next time `ws` will actually water, skipping fires outside its active
    /// period. `None` when it is not scheduled.
    pub fn next_water_time(&self, ws: &WaterSchedule) -> Option<DateTime<Utc>> {
        let next = self
            .scheduler
            .jobs(ws.id)
            .into_iter()
            .find(|job| job.label.as_deref() == Some(WATER_LABEL))?
            .next_run;

        let Some(period) = &ws.active_period else {
            return Some(next);
        };
        let mut next = next;
        for _ in 0..MAX_ACTIVE_PERIOD_SEARCH {
            if period.contains(next) {
                return Some(next);
            }
            let period_start = period.next_start(next)?;
            next = next_occurrence(ws.start_time, ws.interval, period_start);
        }
        None
    }
}

#[cfg(test)]
#[path = "water_tests.rs"]
mod tests;
