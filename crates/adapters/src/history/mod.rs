// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watering history sources

mod noop;

pub use noop::NoOpHistoryAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHistoryAdapter;

use async_trait::async_trait;
use garden_core::{ResourceId, WaterHistory};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history query failed: {0}")]
    QueryFailed(String),
}

/// Reads the event log that controllers report watering into
#[async_trait]
pub trait HistoryAdapter: Clone + Send + Sync + 'static {
    /// Up to `limit` events for `resource_id`, newest first
    async fn water_history(
        &self,
        resource_id: ResourceId,
        limit: usize,
    ) -> Result<Vec<WaterHistory>, HistoryError>;
}
