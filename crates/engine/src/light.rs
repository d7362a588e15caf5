// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Light cycle controller
//!
//! Each garden with a light schedule owns up to three jobs tagged with the
//! garden id: a daily `ON`, a daily `OFF`, and a one-shot `ADHOC_ON` used for
//! ad-hoc ON times and delays.
//!
//! A delay keeps the light OFF longer than scheduled. Delays requested within
//! the same off-window stack, and the pending total is dropped once the
//! delayed ON fires or the garden is rescheduled.

use crate::error::{JobError, LightError};
use crate::scheduler::{Job, JobAction, JobScheduler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use garden_adapters::DispatchAdapter;
use garden_core::recurrence::{next_occurrence, to_delta};
use garden_core::{Clock, Garden, LightAction, LightSchedule, LightState, ResourceId, LIGHT_INTERVAL};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const ON_LABEL: &str = "ON";
pub const OFF_LABEL: &str = "OFF";
pub const ADHOC_ON_LABEL: &str = "ADHOC_ON";

/// Accumulated delay for the current off-window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingDelay {
    /// When the light would otherwise have come on (or went off early)
    base: DateTime<Utc>,
    total: Duration,
}

impl PendingDelay {
    fn delayed_on(&self) -> DateTime<Utc> {
        self.base + to_delta(self.total)
    }
}

type Delays = Arc<Mutex<HashMap<ResourceId, PendingDelay>>>;

fn lock_delays(delays: &Delays) -> MutexGuard<'_, HashMap<ResourceId, PendingDelay>> {
    delays.lock().unwrap_or_else(|e| e.into_inner())
}

/// Next regular ON and OFF transitions at or after `now`
fn next_transitions(ls: &LightSchedule, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let on_anchor = ls.start_time.on_date(now);
    let next_on = next_occurrence(on_anchor, LIGHT_INTERVAL, now);
    let next_off = next_occurrence(on_anchor + to_delta(ls.duration), LIGHT_INTERVAL, now);
    (next_on, next_off)
}

/// First regular ON strictly after `after`
fn regular_on_after(ls: &LightSchedule, after: DateTime<Utc>) -> DateTime<Utc> {
    let next = next_occurrence(ls.start_time.on_date(after), LIGHT_INTERVAL, after);
    if next <= after {
        next + to_delta(LIGHT_INTERVAL)
    } else {
        next
    }
}

/// Sends one light state when fired
struct LightJob<D> {
    garden_id: ResourceId,
    state: LightState,
    dispatch: D,
    /// Set for ON jobs, which end the off-window and its pending delay
    delays: Option<Delays>,
}

#[async_trait]
impl<D: DispatchAdapter> JobAction for LightJob<D> {
    async fn run(&self) -> Result<(), JobError> {
        if let Some(delays) = &self.delays {
            lock_delays(delays).remove(&self.garden_id);
        }
        tracing::info!(garden_id = %self.garden_id, state = %self.state, "executing light action");
        self.dispatch
            .send_light_action(self.garden_id, self.state, None)
            .await?;
        Ok(())
    }
}

/// Computes light transitions and keeps the scheduler's light jobs current
pub struct LightController<D, C> {
    scheduler: JobScheduler<C>,
    dispatch: D,
    clock: C,
    delays: Delays,
}

impl<D: Clone, C: Clone> Clone for LightController<D, C> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            dispatch: self.dispatch.clone(),
            clock: self.clock.clone(),
            delays: Arc::clone(&self.delays),
        }
    }
}

impl<D: DispatchAdapter, C: Clock> LightController<D, C> {
    pub fn new(scheduler: JobScheduler<C>, dispatch: D, clock: C) -> Self {
        Self {
            scheduler,
            dispatch,
            clock,
            delays: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn job(&self, garden_id: ResourceId, state: LightState) -> LightJob<D> {
        LightJob {
            garden_id,
            state,
            dispatch: self.dispatch.clone(),
            delays: (state == LightState::On).then(|| Arc::clone(&self.delays)),
        }
    }

    fn regular_jobs(
        &self,
        garden_id: ResourceId,
        first_on: DateTime<Utc>,
        first_off: DateTime<Utc>,
    ) -> Vec<Job> {
        vec![
            Job::every(LIGHT_INTERVAL, first_on, self.job(garden_id, LightState::On))
                .with_label(ON_LABEL),
            Job::every(LIGHT_INTERVAL, first_off, self.job(garden_id, LightState::Off))
                .with_label(OFF_LABEL),
        ]
    }

    /// Install the daily ON/OFF jobs for `garden`, replacing any it had.
    ///
    /// A future ad-hoc ON time adds a one-off ON. The next regular ON is
    /// skipped only when it would come before the ad-hoc time. An ad-hoc time
    /// in the past is cleared from `garden`, so callers should persist the
    /// garden when it changed.
    pub fn schedule_light_actions(&self, garden: &mut Garden) -> Result<(), LightError> {
        let garden_id = garden.id;
        let ls = garden
            .light_schedule
            .as_mut()
            .ok_or(LightError::NoLightSchedule(garden_id))?;
        ls.validate()?;

        let now = self.clock.now();
        let (next_on, next_off) = next_transitions(ls, now);

        let mut first_on = next_on;
        let mut adhoc = None;
        match ls.adhoc_on_time {
            Some(at) if at > now => {
                if next_on < at {
                    first_on = regular_on_after(ls, next_on);
                }
                adhoc = Some(at);
            }
            Some(at) => {
                tracing::info!(%garden_id, adhoc_on_time = %at, "clearing past adhoc ON time");
                ls.adhoc_on_time = None;
            }
            None => {}
        }

        let mut jobs = self.regular_jobs(garden_id, first_on, next_off);
        if let Some(at) = adhoc {
            jobs.push(Job::once(at, self.job(garden_id, LightState::On)).with_label(ADHOC_ON_LABEL));
        }

        let mut delays = lock_delays(&self.delays);
        self.scheduler.replace(garden_id, jobs)?;
        delays.remove(&garden_id);
        drop(delays);

        tracing::info!(
            %garden_id,
            next_on = %adhoc.unwrap_or(first_on),
            %next_off,
            "scheduled light actions"
        );
        Ok(())
    }

    /// Keep the light OFF for `action.for_duration` longer than scheduled.
    ///
    /// Returns the new ON time. Nothing changes when an error is returned.
    pub fn schedule_light_delay(
        &self,
        garden: &Garden,
        action: &LightAction,
    ) -> Result<DateTime<Utc>, LightError> {
        let ls = garden
            .light_schedule
            .as_ref()
            .ok_or(LightError::NoLightSchedule(garden.id))?;

        let mut delays = lock_delays(&self.delays);
        let (pending, next_off) = self.plan_delay(ls, action, delays.get(&garden.id).copied())?;

        let first_on = regular_on_after(ls, pending.base);
        let mut jobs = self.regular_jobs(garden.id, first_on, next_off);
        jobs.push(
            Job::once(pending.delayed_on(), self.job(garden.id, LightState::On))
                .with_label(ADHOC_ON_LABEL),
        );
        self.scheduler.replace(garden.id, jobs)?;
        delays.insert(garden.id, pending);

        tracing::info!(
            garden_id = %garden.id,
            delay = %humantime::format_duration(pending.total),
            next_on = %pending.delayed_on(),
            "scheduled light delay"
        );
        Ok(pending.delayed_on())
    }

    /// Check a delay against the schedule and return the resulting pending
    /// delay with the OFF transition it must not pass
    fn plan_delay(
        &self,
        ls: &LightSchedule,
        action: &LightAction,
        existing: Option<PendingDelay>,
    ) -> Result<(PendingDelay, DateTime<Utc>), LightError> {
        if action.state != LightState::Off {
            return Err(LightError::DelayStateNotOff);
        }
        let delay = action.for_duration.ok_or(LightError::MissingDelay)?;
        if delay > ls.duration {
            return Err(LightError::DelayTooLong);
        }

        let now = self.clock.now();
        let (next_on, next_off) = next_transitions(ls, now);
        let light_is_on = next_off < next_on;
        let pending = match existing {
            Some(pending) => PendingDelay {
                base: pending.base,
                total: pending.total + delay,
            },
            None if light_is_on => PendingDelay {
                base: now,
                total: delay,
            },
            None => PendingDelay {
                base: next_on,
                total: delay,
            },
        };

        if pending.delayed_on() > next_off {
            return Err(LightError::DelayPastNextOff);
        }
        Ok((pending, next_off))
    }

    /// Next time the light changes to `state`, or `None` for toggle and
    /// unscheduled gardens
    pub fn get_next_time(&self, garden_id: ResourceId, state: LightState) -> Option<DateTime<Utc>> {
        let labels: &[&str] = match state {
            LightState::On => &[ON_LABEL, ADHOC_ON_LABEL],
            LightState::Off => &[OFF_LABEL],
            LightState::Toggle => return None,
        };
        self.scheduler
            .jobs(garden_id)
            .into_iter()
            .filter(|job| job.label.as_deref().is_some_and(|label| labels.contains(&label)))
            .map(|job| job.next_run)
            .min()
    }

    /// The state the light should be in now, including any pending delay
    pub fn current_state(&self, garden: &Garden) -> Option<LightState> {
        let ls = garden.light_schedule.as_ref()?;
        let now = self.clock.now();
        if let Some(pending) = lock_delays(&self.delays).get(&garden.id) {
            if pending.base <= now && now < pending.delayed_on() {
                return Some(LightState::Off);
            }
        }
        Some(ls.state_at(now))
    }

    /// Send `action` to the garden's controller now, then apply any delay
    pub async fn execute_light_action(
        &self,
        garden: &Garden,
        action: &LightAction,
    ) -> Result<Option<DateTime<Utc>>, LightError> {
        if action.for_duration.is_some() {
            let ls = garden
                .light_schedule
                .as_ref()
                .ok_or(LightError::NoLightSchedule(garden.id))?;
            let existing = lock_delays(&self.delays).get(&garden.id).copied();
            self.plan_delay(ls, action, existing)?;
        }

        self.dispatch
            .send_light_action(garden.id, action.state, action.for_duration)
            .await?;

        match action.for_duration {
            Some(_) => Ok(Some(self.schedule_light_delay(garden, action)?)),
            None => Ok(None),
        }
    }

    /// Drop a garden's pending delay (its jobs are removed separately)
    pub fn forget(&self, garden_id: ResourceId) {
        lock_delays(&self.delays).remove(&garden_id);
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
