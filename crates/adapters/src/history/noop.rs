// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{HistoryAdapter, HistoryError};
use async_trait::async_trait;
use garden_core::{ResourceId, WaterHistory};

/// History adapter with an always-empty log
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHistoryAdapter;

impl NoOpHistoryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HistoryAdapter for NoOpHistoryAdapter {
    async fn water_history(
        &self,
        _resource_id: ResourceId,
        _limit: usize,
    ) -> Result<Vec<WaterHistory>, HistoryError> {
        Ok(Vec::new())
    }
}
