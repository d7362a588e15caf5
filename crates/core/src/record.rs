// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Common contract for persisted schedule records

use crate::id::ResourceId;
use chrono::{DateTime, Utc};

/// A persisted record with a stable identity and an optional retirement date
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> ResourceId;

    fn end_date(&self) -> Option<DateTime<Utc>>;

    /// End-dated records are retired: excluded from scheduling and default listings
    fn is_end_dated(&self, now: DateTime<Utc>) -> bool {
        self.end_date().is_some_and(|end| end < now)
    }
}

/// Which records a listing should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    /// Everything, end-dated or not
    All,
    /// Only records not end-dated as of `now`
    Active { now: DateTime<Utc> },
}

impl RecordFilter {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Active { now } => !record.is_end_dated(*now),
        }
    }
}
