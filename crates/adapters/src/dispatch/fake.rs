// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake dispatch adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DispatchAdapter, DispatchError};
use async_trait::async_trait;
use garden_core::{LightState, ResourceId, Zone};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded dispatch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchCall {
    Water {
        garden_id: ResourceId,
        zone_id: ResourceId,
        position: u32,
        duration: Duration,
    },
    Light {
        garden_id: ResourceId,
        state: LightState,
        for_duration: Option<Duration>,
    },
    Stop {
        garden_id: ResourceId,
        all: bool,
    },
}

#[derive(Default)]
struct FakeDispatchState {
    calls: Vec<DispatchCall>,
    fail_with: Option<DispatchError>,
}

/// Fake dispatch adapter that records every call
#[derive(Clone, Default)]
pub struct FakeDispatchAdapter {
    inner: Arc<Mutex<FakeDispatchState>>,
}

impl FakeDispatchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DispatchCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Durations of recorded water actions, oldest first
    pub fn water_durations(&self) -> Vec<Duration> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DispatchCall::Water { duration, .. } => Some(duration),
                _ => None,
            })
            .collect()
    }

    /// States of recorded light actions, oldest first
    pub fn light_states(&self) -> Vec<LightState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DispatchCall::Light { state, .. } => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Make every following call fail (still recording it)
    pub fn fail_with(&self, error: DispatchError) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_with = Some(error);
    }

    fn record(&self, call: DispatchCall) -> Result<(), DispatchError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(call);
        match &inner.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DispatchAdapter for FakeDispatchAdapter {
    async fn send_water_action(&self, zone: &Zone, duration: Duration) -> Result<(), DispatchError> {
        self.record(DispatchCall::Water {
            garden_id: zone.garden_id,
            zone_id: zone.id,
            position: zone.position,
            duration,
        })
    }

    async fn send_light_action(
        &self,
        garden_id: ResourceId,
        state: LightState,
        for_duration: Option<Duration>,
    ) -> Result<(), DispatchError> {
        self.record(DispatchCall::Light {
            garden_id,
            state,
            for_duration,
        })
    }

    async fn send_stop_action(&self, garden_id: ResourceId, all: bool) -> Result<(), DispatchError> {
        self.record(DispatchCall::Stop { garden_id, all })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
