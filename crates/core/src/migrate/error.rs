// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::error::Error;
use thiserror::Error;

/// Name reported when no migration is registered for a version
pub const UNKNOWN_MIGRATION: &str = "Unknown";

/// Failure to move one record along its migration chain
#[derive(Debug, Error)]
#[error("error running migration {name:?}/{version}: {cause}")]
pub struct MigrateError {
    /// Name of the failing migration, or [`UNKNOWN_MIGRATION`]
    pub name: String,
    /// Version of the record when the migration was attempted
    pub version: u32,
    #[source]
    pub cause: MigrateCause,
}

impl MigrateError {
    pub(crate) fn not_found(version: u32) -> Self {
        Self {
            name: UNKNOWN_MIGRATION.to_string(),
            version,
            cause: MigrateCause::NotFound,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.cause, MigrateCause::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum MigrateCause {
    #[error("migration not found")]
    NotFound,
    #[error("unexpected From type")]
    UnexpectedFromType,
    #[error("migration did not advance the version")]
    VersionNotAdvanced,
    #[error("{0}")]
    Failed(#[source] Box<dyn Error + Send + Sync>),
}
