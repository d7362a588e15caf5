// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence of gardens, zones and water schedules

mod memory;

pub use memory::MemoryRecordStore;

use async_trait::async_trait;
use garden_core::{Record, RecordFilter, ResourceId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("record {0} could not be decoded: {1}")]
    Corrupt(ResourceId, String),
}

/// One record family's persistence
#[async_trait]
pub trait RecordStore<R: Record>: Clone + Send + Sync + 'static {
    async fn get_all(&self, filter: RecordFilter) -> Result<Vec<R>, StorageError>;

    async fn get(&self, id: ResourceId) -> Result<Option<R>, StorageError>;

    /// Insert or replace by id
    async fn set(&self, record: &R) -> Result<(), StorageError>;

    /// Deleting a missing record succeeds
    async fn delete(&self, id: ResourceId) -> Result<(), StorageError>;
}
