// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op dispatch adapter for when no controller connection is configured.

use super::{DispatchAdapter, DispatchError};
use async_trait::async_trait;
use garden_core::{LightState, ResourceId, Zone};
use std::time::Duration;

/// Dispatch adapter that accepts every action and sends nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpDispatchAdapter;

impl NoOpDispatchAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DispatchAdapter for NoOpDispatchAdapter {
    async fn send_water_action(
        &self,
        _zone: &Zone,
        _duration: Duration,
    ) -> Result<(), DispatchError> {
        Ok(())
    }

    async fn send_light_action(
        &self,
        _garden_id: ResourceId,
        _state: LightState,
        _for_duration: Option<Duration>,
    ) -> Result<(), DispatchError> {
        Ok(())
    }

    async fn send_stop_action(
        &self,
        _garden_id: ResourceId,
        _all: bool,
    ) -> Result<(), DispatchError> {
        Ok(())
    }
}
