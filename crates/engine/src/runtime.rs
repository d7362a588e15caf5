// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the garden engine
//!
//! Owns the job scheduler and the controllers that feed it, migrates and
//! schedules every stored record at startup, and keeps jobs in step with
//! resource lifecycle events afterwards.

use crate::config::EngineConfig;
use crate::error::RuntimeError;
use crate::events::ResourceEvent;
use crate::light::LightController;
use crate::scheduler::JobScheduler;
use crate::water::WaterEngine;
use chrono::{DateTime, Utc};
use garden_adapters::{DispatchAdapter, HistoryAdapter, RecordStore, WeatherAdapter};
use garden_core::migrate::migrations::{
    garden_migrations, water_schedule_migrations, zone_migrations,
};
use garden_core::{
    calculate_progress, Clock, Garden, LightAction, LightState, Migrations, Record, RecordFilter,
    ResourceId, Versioned, WaterHistoryProgress, WaterSchedule, Zone,
};

/// Runtime adapter dependencies
pub struct RuntimeDeps<D, W, H, GS, ZS, WS> {
    pub dispatch: D,
    pub weather: W,
    pub history: H,
    pub gardens: GS,
    pub zones: ZS,
    pub water_schedules: WS,
}

/// Outcome of migrating one record family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Records whose version changed and were written back
    pub migrated: usize,
    pub failed: usize,
}

/// What [`Runtime::startup`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub gardens: MigrationSummary,
    pub zones: MigrationSummary,
    pub water_schedules: MigrationSummary,
    /// Gardens whose light jobs were installed
    pub scheduled_gardens: usize,
    pub scheduled_water_schedules: usize,
    /// Records that could not be scheduled (logged individually)
    pub schedule_failures: usize,
}

/// Runtime that coordinates the system
pub struct Runtime<D, W, H, GS, ZS, WS, C> {
    scheduler: JobScheduler<C>,
    lights: LightController<D, C>,
    water: WaterEngine<D, W, ZS, C>,
    dispatch: D,
    history: H,
    gardens: GS,
    zones: ZS,
    water_schedules: WS,
    clock: C,
    history_limit: usize,
}

impl<D, W, H, GS, ZS, WS, C> Runtime<D, W, H, GS, ZS, WS, C>
where
    D: DispatchAdapter,
    W: WeatherAdapter,
    H: HistoryAdapter,
    GS: RecordStore<Garden>,
    ZS: RecordStore<Zone>,
    WS: RecordStore<WaterSchedule>,
    C: Clock,
{
    pub fn new(deps: RuntimeDeps<D, W, H, GS, ZS, WS>, clock: C, config: &EngineConfig) -> Self {
        let scheduler = JobScheduler::new(clock.clone(), config.scheduler.clone());
        Self {
            lights: LightController::new(scheduler.clone(), deps.dispatch.clone(), clock.clone()),
            water: WaterEngine::new(
                scheduler.clone(),
                deps.dispatch.clone(),
                deps.weather,
                deps.zones.clone(),
                clock.clone(),
            ),
            scheduler,
            dispatch: deps.dispatch,
            history: deps.history,
            gardens: deps.gardens,
            zones: deps.zones,
            water_schedules: deps.water_schedules,
            clock,
            history_limit: config.history.limit,
        }
    }

    /// Migrate stored records, schedule the active ones and start the
    /// scheduler.
    ///
    /// A record that fails to migrate or schedule is logged and skipped.
    /// Storage failures abort startup.
    pub async fn startup(&self) -> Result<StartupReport, RuntimeError> {
        let mut report = StartupReport::default();

        let (gardens, summary) =
            migrate_records(&self.gardens, &garden_migrations(), "garden").await?;
        report.gardens = summary;
        let (_, summary) = migrate_records(&self.zones, &zone_migrations(), "zone").await?;
        report.zones = summary;
        let (water_schedules, summary) = migrate_records(
            &self.water_schedules,
            &water_schedule_migrations(),
            "water_schedule",
        )
        .await?;
        report.water_schedules = summary;

        let now = self.clock.now();
        for garden in gardens {
            if garden.is_end_dated(now) || garden.light_schedule.is_none() {
                continue;
            }
            let garden_id = garden.id;
            match self.schedule_garden(garden).await {
                Ok(()) => report.scheduled_gardens += 1,
                Err(e) => {
                    tracing::error!(%garden_id, error = %e, "unable to schedule light actions");
                    report.schedule_failures += 1;
                }
            }
        }

        for ws in water_schedules.iter().filter(|ws| !ws.is_end_dated(now)) {
            match self.water.schedule_water_action(ws) {
                Ok(()) => report.scheduled_water_schedules += 1,
                Err(e) => {
                    tracing::error!(water_schedule_id = %ws.id, error = %e, "unable to schedule water action");
                    report.schedule_failures += 1;
                }
            }
        }

        self.scheduler.start();
        tracing::info!(
            scheduled_gardens = report.scheduled_gardens,
            scheduled_water_schedules = report.scheduled_water_schedules,
            schedule_failures = report.schedule_failures,
            "runtime started"
        );
        Ok(report)
    }

    /// Bring scheduled jobs in line with a resource change
    pub async fn handle_event(&self, event: ResourceEvent) -> Result<(), RuntimeError> {
        tracing::debug!(event = event.name(), resource_id = %event.resource_id(), "handling event");

        match event {
            ResourceEvent::GardenSaved(garden) => {
                let now = self.clock.now();
                if garden.is_end_dated(now) || garden.light_schedule.is_none() {
                    self.unschedule_garden(garden.id);
                } else {
                    self.schedule_garden(garden).await?;
                }
            }

            ResourceEvent::GardenDeleted(garden_id) => {
                self.unschedule_garden(garden_id);
            }

            ResourceEvent::WaterScheduleSaved(ws) => {
                self.water.schedule_water_action(&ws)?;
            }

            ResourceEvent::WaterScheduleDeleted(water_schedule_id) => {
                self.water.remove_water_action(water_schedule_id);
            }
        }

        Ok(())
    }

    /// Install light jobs, writing the garden back if its past ad-hoc ON
    /// time was cleared
    async fn schedule_garden(&self, mut garden: Garden) -> Result<(), RuntimeError> {
        let before = garden.light_schedule.clone();
        self.lights.schedule_light_actions(&mut garden)?;
        if garden.light_schedule != before {
            self.gardens.set(&garden).await?;
        }
        Ok(())
    }

    fn unschedule_garden(&self, garden_id: ResourceId) {
        self.scheduler.remove_by_tag(garden_id);
        self.lights.forget(garden_id);
        tracing::info!(%garden_id, "removed light actions");
    }

    /// Send a light action to a stored garden, applying any delay.
    ///
    /// Returns the delayed ON time when the action carried a delay.
    pub async fn execute_light_action(
        &self,
        garden_id: ResourceId,
        action: &LightAction,
    ) -> Result<Option<DateTime<Utc>>, RuntimeError> {
        let garden = self.garden(garden_id).await?;
        Ok(self.lights.execute_light_action(&garden, action).await?)
    }

    /// Stop the current watering, or clear the whole queue with `all`
    pub async fn stop_watering(&self, garden_id: ResourceId, all: bool) -> Result<(), RuntimeError> {
        self.garden(garden_id).await?;
        self.dispatch.send_stop_action(garden_id, all).await?;
        tracing::info!(%garden_id, all, "sent stop action");
        Ok(())
    }

    /// Progress of the current or most recent watering of `resource_id`
    pub async fn water_progress(
        &self,
        resource_id: ResourceId,
    ) -> Result<WaterHistoryProgress, RuntimeError> {
        let history = self
            .history
            .water_history(resource_id, self.history_limit)
            .await?;
        Ok(calculate_progress(&history, self.clock.now()))
    }

    pub fn next_light_time(&self, garden_id: ResourceId, state: LightState) -> Option<DateTime<Utc>> {
        self.lights.get_next_time(garden_id, state)
    }

    pub fn next_water_time(&self, ws: &WaterSchedule) -> Option<DateTime<Utc>> {
        self.water.next_water_time(ws)
    }

    pub fn scheduler(&self) -> &JobScheduler<C> {
        &self.scheduler
    }

    pub fn lights(&self) -> &LightController<D, C> {
        &self.lights
    }

    pub fn water(&self) -> &WaterEngine<D, W, ZS, C> {
        &self.water
    }

    /// Cancel every job and stop the scheduling task
    pub fn shutdown(&self) {
        self.scheduler.stop();
        tracing::info!("runtime stopped");
    }

    async fn garden(&self, garden_id: ResourceId) -> Result<Garden, RuntimeError> {
        self.gardens
            .get(garden_id)
            .await?
            .ok_or(RuntimeError::GardenNotFound(garden_id))
    }
}

/// Migrate every record in `store`, end-dated ones included, and write back
/// those whose version changed.
///
/// Returns the records that migrated successfully.
async fn migrate_records<R, S>(
    store: &S,
    migrations: &Migrations,
    family: &'static str,
) -> Result<(Vec<R>, MigrationSummary), RuntimeError>
where
    R: Record + Versioned,
    S: RecordStore<R>,
{
    let mut summary = MigrationSummary::default();
    let mut current = Vec::new();

    for record in store.get_all(RecordFilter::All).await? {
        let id = record.id();
        let version = record.version();
        match migrations.run_to_target::<R>(Box::new(record)) {
            Ok(migrated) => {
                if migrated.version() != version {
                    store.set(&migrated).await?;
                    summary.migrated += 1;
                    tracing::info!(
                        family,
                        %id,
                        from = version,
                        to = migrated.version(),
                        "migrated record"
                    );
                }
                current.push(migrated);
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(family, %id, error = %e, "unable to migrate record");
            }
        }
    }

    Ok((current, summary))
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
