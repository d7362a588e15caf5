// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake history adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HistoryAdapter, HistoryError};
use async_trait::async_trait;
use garden_core::{ResourceId, WaterHistory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeHistoryState {
    events: HashMap<ResourceId, Vec<WaterHistory>>,
    queries: Vec<(ResourceId, usize)>,
    fail_with: Option<HistoryError>,
}

/// In-memory event log; events are appended oldest to newest
#[derive(Clone, Default)]
pub struct FakeHistoryAdapter {
    inner: Arc<Mutex<FakeHistoryState>>,
}

impl FakeHistoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a device report
    pub fn push(&self, resource_id: ResourceId, event: WaterHistory) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .events
            .entry(resource_id)
            .or_default()
            .push(event);
    }

    /// `(resource_id, limit)` of every query, oldest first
    pub fn queries(&self) -> Vec<(ResourceId, usize)> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queries
            .clone()
    }

    pub fn fail_with(&self, error: HistoryError) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_with = Some(error);
    }
}

#[async_trait]
impl HistoryAdapter for FakeHistoryAdapter {
    async fn water_history(
        &self,
        resource_id: ResourceId,
        limit: usize,
    ) -> Result<Vec<WaterHistory>, HistoryError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.queries.push((resource_id, limit));
        if let Some(error) = &inner.fail_with {
            return Err(error.clone());
        }
        Ok(inner
            .events
            .get(&resource_id)
            .map(|events| events.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
