// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{RecordStore, StorageError};
use async_trait::async_trait;
use garden_core::{Record, RecordFilter, ResourceId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Process-local record store.
///
/// Listings come back in id order, which for v7 ids is creation order.
#[derive(Clone)]
pub struct MemoryRecordStore<R> {
    records: Arc<Mutex<BTreeMap<ResourceId, R>>>,
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl<R: Record> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().unwrap_or_else(|e| e.into_inner());
            for record in records {
                map.insert(record.id(), record);
            }
        }
        store
    }

    /// Synchronous snapshot of a record
    pub fn snapshot(&self, id: ResourceId) -> Option<R> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryRecordStore<R> {
    async fn get_all(&self, filter: RecordFilter) -> Result<Vec<R>, StorageError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records
            .values()
            .filter(|record| filter.matches(*record))
            .cloned()
            .collect())
    }

    async fn get(&self, id: ResourceId) -> Result<Option<R>, StorageError> {
        Ok(self.snapshot(id))
    }

    async fn set(&self, record: &R) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.id(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
