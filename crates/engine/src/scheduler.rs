// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recurring job scheduler keyed by resource id
//!
//! Jobs are grouped under a tag (the id of the garden or water schedule that
//! owns them) and optionally labelled. All bookkeeping lives behind one mutex;
//! due jobs are dispatched to their own tokio task so a slow job never holds up
//! another.
//!
//! A recurring job is not re-queued while it runs. When it finishes, its next
//! fire is the first `first_run + k * interval` after the fire that just ran,
//! or immediately if that boundary has already passed.
//!
//! `stop` is final: afterwards the scheduler rejects new jobs.

use crate::config::SchedulerConfig;
use crate::error::{JobError, SchedulerError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use garden_core::recurrence::{checked_add, next_occurrence, to_duration};
use garden_core::{Clock, ResourceId};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub type JobId = u64;

/// Work performed when a job fires
#[async_trait]
pub trait JobAction: Send + Sync + 'static {
    async fn run(&self) -> Result<(), JobError>;
}

/// Adapts an async closure into a [`JobAction`]
pub struct FnAction<F>(F);

#[async_trait]
impl<F, Fut> JobAction for FnAction<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), JobError>> + Send + 'static,
{
    async fn run(&self) -> Result<(), JobError> {
        (self.0)().await
    }
}

pub fn action_fn<F, Fut>(f: F) -> FnAction<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), JobError>> + Send + 'static,
{
    FnAction(f)
}

/// A job waiting to be registered
pub struct Job {
    label: Option<String>,
    first_run: DateTime<Utc>,
    interval: Option<Duration>,
    action: Arc<dyn JobAction>,
}

impl Job {
    /// Fire at `first_run` and every `interval` after it
    pub fn every(interval: Duration, first_run: DateTime<Utc>, action: impl JobAction) -> Self {
        Self {
            label: None,
            first_run,
            interval: Some(interval),
            action: Arc::new(action),
        }
    }

    /// Fire once at `at`
    pub fn once(at: DateTime<Utc>, action: impl JobAction) -> Self {
        Self {
            label: None,
            first_run: at,
            interval: None,
            action: Arc::new(action),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn validate(&self) -> Result<(), SchedulerError> {
        match self.interval {
            Some(interval) if interval.is_zero() => Err(SchedulerError::NonPositiveInterval),
            Some(interval) if checked_add(self.first_run, interval).is_none() => {
                Err(SchedulerError::IntervalOutOfRange)
            }
            _ => Ok(()),
        }
    }
}

/// Snapshot of a registered job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub id: JobId,
    pub tag: ResourceId,
    pub label: Option<String>,
    pub next_run: DateTime<Utc>,
    pub interval: Option<Duration>,
}

struct Entry {
    tag: ResourceId,
    label: Option<String>,
    anchor: DateTime<Utc>,
    interval: Option<Duration>,
    next_run: DateTime<Utc>,
    action: Arc<dyn JobAction>,
    in_flight: bool,
}

impl Entry {
    fn info(&self, id: JobId) -> JobInfo {
        JobInfo {
            id,
            tag: self.tag,
            label: self.label.clone(),
            next_run: self.next_run,
            interval: self.interval,
        }
    }
}

/// A pending fire in the queue; stale fires are skipped when popped
#[derive(Debug, Clone, Copy)]
struct ScheduledFire {
    fire_at: DateTime<Utc>,
    job_id: JobId,
}

impl PartialEq for ScheduledFire {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.job_id == other.job_id
    }
}

impl Eq for ScheduledFire {}

impl PartialOrd for ScheduledFire {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledFire {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest first
        Reverse((self.fire_at, self.job_id)).cmp(&Reverse((other.fire_at, other.job_id)))
    }
}

#[derive(Default)]
struct State {
    entries: HashMap<JobId, Entry>,
    queue: BinaryHeap<ScheduledFire>,
    next_id: JobId,
    running: bool,
    stopped: bool,
}

impl State {
    fn insert(&mut self, tag: ResourceId, job: Job, now: DateTime<Utc>) -> JobId {
        self.next_id += 1;
        let id = self.next_id;
        // A first run in the past fires right away; the recurrence keeps its phase
        let next_run = job.first_run.max(now);
        self.entries.insert(
            id,
            Entry {
                tag,
                label: job.label,
                anchor: job.first_run,
                interval: job.interval,
                next_run,
                action: job.action,
                in_flight: false,
            },
        );
        self.queue.push(ScheduledFire {
            fire_at: next_run,
            job_id: id,
        });
        id
    }

    fn remove_tag(&mut self, tag: ResourceId) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.tag != tag);
        if self.entries.len() != before {
            let entries = &self.entries;
            self.queue.retain(|fire| entries.contains_key(&fire.job_id));
        }
    }
}

struct Inner<C> {
    clock: C,
    config: SchedulerConfig,
    state: Mutex<State>,
    wake: Notify,
}

impl<C: Clock> Inner<C> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Re-queue a recurring job once its worker has finished
    fn complete(&self, id: JobId, fired_at: DateTime<Utc>) {
        let now = self.clock.now();
        let mut state = self.lock();
        let Some(entry) = state.entries.get_mut(&id) else {
            return;
        };
        entry.in_flight = false;
        let Some(interval) = entry.interval else {
            return;
        };

        let next = next_occurrence(entry.anchor, interval, fired_at);
        let next = if next > fired_at {
            Some(next)
        } else {
            checked_add(next, interval)
        };
        let Some(next) = next else {
            let tag = entry.tag;
            state.entries.remove(&id);
            tracing::warn!(%tag, "job recurrence ran past the calendar, removing");
            return;
        };
        entry.next_run = next.max(now);
        let fire = ScheduledFire {
            fire_at: entry.next_run,
            job_id: id,
        };
        state.queue.push(fire);
        drop(state);
        self.wake.notify_one();
    }
}

/// Handle to the shared job table; clones refer to the same scheduler
pub struct JobScheduler<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for JobScheduler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> JobScheduler<C> {
    pub fn new(clock: C, config: SchedulerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                clock,
                config,
                state: Mutex::new(State::default()),
                wake: Notify::new(),
            }),
        }
    }

    /// Register a job under `tag`.
    ///
    /// Does not remove other jobs for the tag; use [`Self::replace`] to reset.
    pub fn schedule(&self, tag: ResourceId, job: Job) -> Result<JobId, SchedulerError> {
        job.validate()?;
        let now = self.inner.clock.now();
        let id = {
            let mut state = self.inner.lock();
            if state.stopped {
                return Err(SchedulerError::Stopped);
            }
            state.insert(tag, job, now)
        };
        self.inner.wake.notify_one();
        Ok(id)
    }

    /// Remove every job for `tag` and register `jobs` in one step.
    ///
    /// Concurrent replaces for the same tag never leave jobs from both.
    pub fn replace(&self, tag: ResourceId, jobs: Vec<Job>) -> Result<Vec<JobId>, SchedulerError> {
        for job in &jobs {
            job.validate()?;
        }
        let now = self.inner.clock.now();
        let ids = {
            let mut state = self.inner.lock();
            if state.stopped {
                return Err(SchedulerError::Stopped);
            }
            state.remove_tag(tag);
            jobs.into_iter()
                .map(|job| state.insert(tag, job, now))
                .collect()
        };
        self.inner.wake.notify_one();
        Ok(ids)
    }

    /// Cancel every job for `tag`; unknown tags are ignored
    pub fn remove_by_tag(&self, tag: ResourceId) {
        self.inner.lock().remove_tag(tag);
    }

    /// Earliest upcoming fire for `tag`
    pub fn next_run(&self, tag: ResourceId) -> Option<DateTime<Utc>> {
        self.inner
            .lock()
            .entries
            .values()
            .filter(|entry| entry.tag == tag)
            .map(|entry| entry.next_run)
            .min()
    }

    /// Jobs registered for `tag`, earliest first
    pub fn jobs(&self, tag: ResourceId) -> Vec<JobInfo> {
        let state = self.inner.lock();
        let mut jobs: Vec<_> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.tag == tag)
            .map(|(id, entry)| entry.info(*id))
            .collect();
        jobs.sort_by_key(|job| (job.next_run, job.id));
        jobs
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Dispatch every job due at the clock's current time.
    ///
    /// Returns the worker handles; awaiting them is optional.
    pub fn run_pending(&self) -> Vec<JoinHandle<()>> {
        let now = self.inner.clock.now();
        let mut due = Vec::new();
        {
            let mut state = self.inner.lock();
            while let Some(fire) = state.queue.peek().copied() {
                if fire.fire_at > now {
                    break;
                }
                state.queue.pop();

                let Some(entry) = state.entries.get_mut(&fire.job_id) else {
                    continue;
                };
                if entry.in_flight || entry.next_run != fire.fire_at {
                    continue;
                }
                due.push((
                    fire,
                    entry.tag,
                    entry.label.clone(),
                    Arc::clone(&entry.action),
                ));
                if entry.interval.is_some() {
                    entry.in_flight = true;
                } else {
                    state.entries.remove(&fire.job_id);
                }
            }
        }

        due.into_iter()
            .map(|(fire, tag, label, action)| {
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    tracing::debug!(%tag, label = label.as_deref(), "job fired");
                    if let Err(e) = action.run().await {
                        tracing::error!(%tag, label = label.as_deref(), error = %e, "job failed");
                    }
                    inner.complete(fire.job_id, fire.fire_at);
                })
            })
            .collect()
    }

    /// How long the scheduling task may sleep before the next due job
    fn idle_time(&self) -> Duration {
        let now = self.inner.clock.now();
        let max_idle = self.inner.config.max_idle;
        let state = self.inner.lock();
        state
            .queue
            .peek()
            .map(|fire| to_duration(fire.fire_at - now).min(max_idle))
            .unwrap_or(max_idle)
    }

    /// Spawn the scheduling task; calling it again while running, or after
    /// [`Self::stop`], does nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        {
            let mut state = self.inner.lock();
            if state.running || state.stopped {
                return;
            }
            state.running = true;
        }

        let scheduler = self.clone();
        tokio::spawn(async move {
            tracing::info!("scheduler started");
            while scheduler.is_running() {
                scheduler.run_pending();
                let idle = scheduler.idle_time();
                tokio::select! {
                    _ = tokio::time::sleep(idle) => {}
                    _ = scheduler.inner.wake.notified() => {}
                }
            }
            tracing::info!("scheduler stopped");
        });
    }

    /// Cancel every pending fire and stop the scheduling task.
    ///
    /// Workers already dispatched run to completion. Idempotent.
    pub fn stop(&self) {
        {
            let mut state = self.inner.lock();
            state.running = false;
            state.stopped = true;
            state.entries.clear();
            state.queue.clear();
        }
        self.inner.wake.notify_one();
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
