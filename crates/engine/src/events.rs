// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle events for schedulable resources

use garden_core::{Garden, ResourceId, WaterSchedule};

/// A change to a persisted resource that affects its scheduled jobs.
///
/// Emitted by whatever layer writes records (an API, a config reload) after
/// the write succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    /// Created or updated, including being end-dated
    GardenSaved(Garden),
    GardenDeleted(ResourceId),
    WaterScheduleSaved(WaterSchedule),
    WaterScheduleDeleted(ResourceId),
}

impl ResourceEvent {
    pub fn resource_id(&self) -> ResourceId {
        match self {
            ResourceEvent::GardenSaved(garden) => garden.id,
            ResourceEvent::WaterScheduleSaved(ws) => ws.id,
            ResourceEvent::GardenDeleted(id) | ResourceEvent::WaterScheduleDeleted(id) => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceEvent::GardenSaved(_) => "garden:saved",
            ResourceEvent::GardenDeleted(_) => "garden:deleted",
            ResourceEvent::WaterScheduleSaved(_) => "water_schedule:saved",
            ResourceEvent::WaterScheduleDeleted(_) => "water_schedule:deleted",
        }
    }
}
