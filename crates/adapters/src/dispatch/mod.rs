// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters that deliver actions to garden controllers

mod noop;

pub use noop::NoOpDispatchAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DispatchCall, FakeDispatchAdapter};

use async_trait::async_trait;
use garden_core::{LightState, ResourceId, Zone};
use std::time::Duration;
use thiserror::Error;

/// Errors from delivering an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("publish failed: {0}")]
    PublishFailed(String),
    #[error("no controller for {0}")]
    UnknownController(ResourceId),
}

/// Delivers water, light and stop actions to controllers
#[async_trait]
pub trait DispatchAdapter: Clone + Send + Sync + 'static {
    /// Open `zone`'s valve on its garden's controller for `duration`
    async fn send_water_action(&self, zone: &Zone, duration: Duration)
        -> Result<(), DispatchError>;

    /// Set a garden's light, optionally keeping it OFF for `for_duration`
    async fn send_light_action(
        &self,
        garden_id: ResourceId,
        state: LightState,
        for_duration: Option<Duration>,
    ) -> Result<(), DispatchError>;

    /// Stop the current watering, or clear the whole queue when `all` is set
    async fn send_stop_action(&self, garden_id: ResourceId, all: bool)
        -> Result<(), DispatchError>;
}
