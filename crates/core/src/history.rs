// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watering history and the progress derived from it

use crate::recurrence::to_duration;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Completions older than this are no longer shown
pub const COMPLETED_VISIBILITY: Duration = Duration::from_secs(60 * 60);

/// Grace period for a queued event to start after the previous one completes
pub const START_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterStatus {
    #[serde(rename = "sent")]
    Sent,
    #[serde(rename = "start")]
    Started,
    #[serde(rename = "complete")]
    Completed,
}

/// One device report about a watering event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterHistory {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub event_id: String,
    pub status: WaterStatus,
    /// Where the watering was requested from (schedule, manual, ...)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl WaterHistory {
    pub fn sent(event_id: impl Into<String>, duration: Duration, sent_at: DateTime<Utc>) -> Self {
        Self {
            duration,
            event_id: event_id.into(),
            status: WaterStatus::Sent,
            source: String::new(),
            sent_at,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn started(mut self, at: DateTime<Utc>) -> Self {
        self.status = WaterStatus::Started;
        self.started_at = Some(at);
        self
    }

    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.status = WaterStatus::Completed;
        self.completed_at = Some(at);
        self
    }
}

/// Anomalies shown alongside progress; never fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressError {
    #[error("elapsed time is longer than the watering duration")]
    ElapsedExceedsDuration,
    #[error("water event was sent but has not started")]
    SentButNotStarted,
}

/// Live state of the current watering, recomputed on every read
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaterHistoryProgress {
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// Fraction of `duration` completed, in `[0, 1]`
    pub progress: f64,
    /// Events sent but not yet started
    pub queue: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProgressError>,
}

impl WaterHistoryProgress {
    fn queued(queue: u32) -> Self {
        Self {
            queue,
            ..Self::default()
        }
    }
}

/// Reduce a newest-first history to the progress shown for it at `now`.
///
/// Sent events are counted until the first Started or Completed event, which
/// decides the result:
///
/// - Started: proportional progress, or [`ProgressError::ElapsedExceedsDuration`]
///   when the run should already have finished
/// - Completed: nothing when stale or nothing is queued, otherwise a finished
///   run, or [`ProgressError::SentButNotStarted`] when the queued event has had
///   time to start and hasn't
pub fn calculate_progress(history: &[WaterHistory], now: DateTime<Utc>) -> WaterHistoryProgress {
    let mut queue = 0u32;
    let mut last_sent: Option<&WaterHistory> = None;

    for event in history {
        match event.status {
            WaterStatus::Sent => {
                queue += 1;
                last_sent = Some(event);
            }
            WaterStatus::Started => {
                let started_at = event.started_at.unwrap_or(event.sent_at);
                return started_progress(event.duration, now - started_at, queue);
            }
            WaterStatus::Completed => {
                let completed_at = event.completed_at.unwrap_or(event.sent_at);
                let since_completed = to_duration(now - completed_at);
                if since_completed > COMPLETED_VISIBILITY || queue == 0 {
                    return WaterHistoryProgress::default();
                }

                // The queued event should start once both it was sent and
                // the previous one completed
                let due = last_sent.map_or(completed_at, |sent| sent.sent_at.max(completed_at));
                if to_duration(now - due) >= START_GRACE {
                    return WaterHistoryProgress {
                        error: Some(ProgressError::SentButNotStarted),
                        ..WaterHistoryProgress::queued(queue)
                    };
                }

                return WaterHistoryProgress {
                    duration: event.duration,
                    elapsed: since_completed,
                    progress: 1.0,
                    queue,
                    error: None,
                };
            }
        }
    }

    WaterHistoryProgress::queued(queue)
}

fn started_progress(duration: Duration, elapsed: TimeDelta, queue: u32) -> WaterHistoryProgress {
    let elapsed = to_duration(elapsed);
    if elapsed > duration {
        return WaterHistoryProgress {
            duration,
            elapsed,
            progress: 0.0,
            queue,
            error: Some(ProgressError::ElapsedExceedsDuration),
        };
    }

    let progress = if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f64() / duration.as_secs_f64()
    };
    WaterHistoryProgress {
        duration,
        elapsed,
        progress,
        queue,
        error: None,
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
