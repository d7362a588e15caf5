// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned migration pipeline
//!
//! A [`Migrations`] list maps a record at version `v` to version `v + 1` using
//! the step registered at index `v`. Each step names its input and output
//! types; the driver only sees the [`Versioned`] capability and checks the
//! concrete type at every step.
//!
//! ```text
//! Migrations::starting_at(1)
//!     .then("V1toV2", |a: A1| -> Result<A2, E> { ... })   // index 1
//!     .then("V2toV3", |a: A2| -> Result<A3, E> { ... })   // index 2
//! ```
//!
//! The target version of the list is its length including the skipped base
//! versions, so the list above migrates any `A1`/`A2` up to version 3.

mod error;
pub mod migrations;

pub use error::{MigrateCause, MigrateError, UNKNOWN_MIGRATION};

use std::any::Any;
use std::error::Error;
use std::marker::PhantomData;

/// Type-erasure helper so boxed records can be downcast after a step
pub trait AsAny: Any {
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A record that knows its schema version
pub trait Versioned: AsAny + Send {
    fn version(&self) -> u32;

    /// Records that can be stamped with a new version return themselves
    fn as_increment_version(&mut self) -> Option<&mut dyn IncrementVersion> {
        None
    }
}

pub trait IncrementVersion {
    fn set_version(&mut self, version: u32);
}

/// One step from version `v` to `v + 1`
pub trait Migration: Send + Sync {
    fn name(&self) -> &str;

    fn migrate(&self, record: Box<dyn Versioned>) -> Result<Box<dyn Versioned>, MigrateCause>;
}

/// A migration backed by a typed function
struct FnMigration<Old, New, F> {
    name: String,
    func: F,
    _types: PhantomData<fn(Old) -> New>,
}

impl<Old, New, F, E> Migration for FnMigration<Old, New, F>
where
    Old: Versioned,
    New: Versioned,
    F: Fn(Old) -> Result<New, E> + Send + Sync,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn migrate(&self, record: Box<dyn Versioned>) -> Result<Box<dyn Versioned>, MigrateCause> {
        let from = record
            .into_any()
            .downcast::<Old>()
            .map_err(|_| MigrateCause::UnexpectedFromType)?;
        let to = (self.func)(*from).map_err(|e| MigrateCause::Failed(e.into()))?;
        Ok(Box::new(to))
    }
}

/// Ordered migration steps for one record family
pub struct Migrations {
    first_version: u32,
    steps: Vec<Box<dyn Migration>>,
}

impl Default for Migrations {
    fn default() -> Self {
        Self::new()
    }
}

impl Migrations {
    /// A list whose first step migrates version 0
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// A list whose first step migrates `version`; lower versions have no step
    pub fn starting_at(version: u32) -> Self {
        Self {
            first_version: version,
            steps: Vec::new(),
        }
    }

    /// Append the step for the next version
    pub fn then<Old, New, F, E>(mut self, name: impl Into<String>, func: F) -> Self
    where
        Old: Versioned,
        New: Versioned,
        F: Fn(Old) -> Result<New, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>> + 'static,
    {
        self.steps.push(Box::new(FnMigration {
            name: name.into(),
            func,
            _types: PhantomData,
        }));
        self
    }

    /// Version every record ends up at
    pub fn target_version(&self) -> u32 {
        self.first_version + self.steps.len() as u32
    }

    fn step(&self, version: u32) -> Option<&dyn Migration> {
        let index = version.checked_sub(self.first_version)?;
        self.steps.get(index as usize).map(|step| step.as_ref())
    }

    /// Apply the single step registered for the record's current version.
    pub fn run_one(&self, record: Box<dyn Versioned>) -> Result<Box<dyn Versioned>, MigrateError> {
        let version = record.version();
        let step = self
            .step(version)
            .ok_or_else(|| MigrateError::not_found(version))?;

        let mut migrated = step.migrate(record).map_err(|cause| MigrateError {
            name: step.name().to_string(),
            version,
            cause,
        })?;
        if let Some(incrementable) = migrated.as_increment_version() {
            incrementable.set_version(version + 1);
        }
        Ok(migrated)
    }

    /// Apply steps until the record reaches [`Self::target_version`] and
    /// return it as `New`.
    pub fn run_to_target<New: Versioned>(
        &self,
        record: Box<dyn Versioned>,
    ) -> Result<New, MigrateError> {
        let target = self.target_version();
        let mut current = record;
        loop {
            let version = current.version();
            if version >= target {
                break;
            }
            current = self.run_one(current)?;
            if current.version() <= version {
                let name = self
                    .step(version)
                    .map(|step| step.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_MIGRATION.to_string());
                return Err(MigrateError {
                    name,
                    version,
                    cause: MigrateCause::VersionNotAdvanced,
                });
            }
        }

        let version = current.version();
        if version > target {
            return Err(MigrateError::not_found(version));
        }
        current
            .into_any()
            .downcast::<New>()
            .map(|to| *to)
            .map_err(|_| MigrateError::not_found(version))
    }

    /// Lazily migrate each record; consumers may stop early.
    pub fn each<'a, Old, New, I>(
        &'a self,
        records: I,
    ) -> impl Iterator<Item = Result<New, MigrateError>> + 'a
    where
        Old: Versioned,
        New: Versioned,
        I: IntoIterator<Item = Old>,
        I::IntoIter: 'a,
    {
        records
            .into_iter()
            .map(move |record| self.run_to_target::<New>(Box::new(record)))
    }

    /// Migrate every record, stopping at the first failure.
    pub fn all<Old, New, I>(&self, records: I) -> Result<Vec<New>, MigrateError>
    where
        Old: Versioned,
        New: Versioned,
        I: IntoIterator<Item = Old>,
    {
        records
            .into_iter()
            .map(|record| self.run_to_target::<New>(Box::new(record)))
            .collect()
    }
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
