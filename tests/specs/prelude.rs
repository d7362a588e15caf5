//! Shared harness for the behavioral specs

#![allow(dead_code, unused_imports)]

pub use chrono::{DateTime, TimeDelta, TimeZone, Utc};
pub use garden_adapters::{
    DispatchCall, FakeDispatchAdapter, FakeHistoryAdapter, FakeWeatherAdapter, MemoryRecordStore,
    RecordStore, WeatherError,
};
pub use garden_core::{
    FakeClock, Garden, LightAction, LightSchedule, LightState, ProgressError, ResourceId,
    ScaleControl, WaterHistory, WaterHistoryProgress, WaterSchedule, WeatherControl, Zone,
};
pub use garden_engine::{EngineConfig, ResourceEvent, Runtime, RuntimeDeps, RuntimeError};
pub use std::time::Duration;

pub type GardenRuntime = Runtime<
    FakeDispatchAdapter,
    FakeWeatherAdapter,
    FakeHistoryAdapter,
    MemoryRecordStore<Garden>,
    MemoryRecordStore<Zone>,
    MemoryRecordStore<WaterSchedule>,
    FakeClock,
>;

pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}

pub fn hours(n: u64) -> Duration {
    Duration::from_secs(n * 60 * 60)
}

/// 2026-06-01 at `hour:minute` UTC
pub fn june_1(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
}

/// A runtime and handles on everything it talks to
pub struct World {
    pub runtime: GardenRuntime,
    pub clock: FakeClock,
    pub dispatch: FakeDispatchAdapter,
    pub weather: FakeWeatherAdapter,
    pub history: FakeHistoryAdapter,
    pub gardens: MemoryRecordStore<Garden>,
    pub zones: MemoryRecordStore<Zone>,
    pub water_schedules: MemoryRecordStore<WaterSchedule>,
}

impl World {
    /// Runtime with empty stores and the clock at `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        let clock = FakeClock::at(now);
        let dispatch = FakeDispatchAdapter::new();
        let weather = FakeWeatherAdapter::new();
        let history = FakeHistoryAdapter::new();
        let gardens = MemoryRecordStore::new();
        let zones = MemoryRecordStore::new();
        let water_schedules = MemoryRecordStore::new();
        let deps = RuntimeDeps {
            dispatch: dispatch.clone(),
            weather: weather.clone(),
            history: history.clone(),
            gardens: gardens.clone(),
            zones: zones.clone(),
            water_schedules: water_schedules.clone(),
        };
        Self {
            runtime: Runtime::new(deps, clock.clone(), &EngineConfig::default()),
            clock,
            dispatch,
            weather,
            history,
            gardens,
            zones,
            water_schedules,
        }
    }

    /// Store and schedule a garden
    pub async fn save_garden(&self, garden: &Garden) {
        self.gardens.set(garden).await.unwrap();
        self.runtime
            .handle_event(ResourceEvent::GardenSaved(garden.clone()))
            .await
            .unwrap();
    }

    /// Store and schedule a water schedule
    pub async fn save_water_schedule(&self, ws: &WaterSchedule) {
        self.water_schedules.set(ws).await.unwrap();
        self.runtime
            .handle_event(ResourceEvent::WaterScheduleSaved(ws.clone()))
            .await
            .unwrap();
    }

    /// Store a zone of a new garden watered by `ws`
    pub async fn zone_using(&self, ws: &WaterSchedule, position: u32) -> Zone {
        let mut zone = Zone::new(ResourceId::new(), ResourceId::new(), position);
        zone.water_schedule_ids.push(ws.id);
        self.zones.set(&zone).await.unwrap();
        zone
    }

    /// Move the clock to `at` and run every job due then
    pub async fn run_at(&self, at: DateTime<Utc>) {
        self.clock.set(at);
        for handle in self.runtime.scheduler().run_pending() {
            handle.await.unwrap();
        }
    }
}

/// Garden whose light is ON from `start` (e.g. "18:00:00Z") for `duration`
pub fn lit_garden(start: &str, duration: Duration) -> Garden {
    Garden::new(ResourceId::new(), "garden")
        .with_light_schedule(LightSchedule::new(duration, start.parse().unwrap()))
}

/// 30m every day at 06:00 UTC, phase set in May 2026
pub fn daily_water_schedule() -> WaterSchedule {
    WaterSchedule::new(
        ResourceId::new(),
        minutes(30),
        hours(24),
        Utc.with_ymd_and_hms(2026, 5, 1, 6, 0, 0).unwrap(),
    )
}
