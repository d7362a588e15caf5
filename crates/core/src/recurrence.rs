// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase-anchored recurrence math
//!
//! A recurring schedule is described by an anchor instant and an interval.
//! Its occurrences are `anchor + k * interval` for every integer `k`, so the
//! anchor fixes the phase and may lie in the past or the future.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Convert a std duration to a chrono delta, saturating on overflow
pub fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

/// Convert a chrono delta to a std duration, clamping negatives to zero
pub fn to_duration(delta: TimeDelta) -> Duration {
    delta.to_std().unwrap_or(Duration::ZERO)
}

/// `at + duration`, or `None` past the representable range
pub fn checked_add(at: DateTime<Utc>, duration: Duration) -> Option<DateTime<Utc>> {
    at.checked_add_signed(TimeDelta::from_std(duration).ok()?)
}

fn saturating_add(at: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    at.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// First occurrence of the recurrence at or after `after`.
///
/// A zero interval has a single occurrence, the anchor itself. Occurrences
/// past the representable range saturate to [`DateTime::MAX_UTC`].
pub fn next_occurrence(
    anchor: DateTime<Utc>,
    interval: Duration,
    after: DateTime<Utc>,
) -> DateTime<Utc> {
    let step = to_delta(interval);
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 {
        return anchor;
    }

    let offset_ms = (after - anchor).num_milliseconds();
    // ceil(offset / step), valid for negative offsets too
    let k = offset_ms.div_euclid(step_ms) + i64::from(offset_ms.rem_euclid(step_ms) != 0);
    let shift_ms = k.saturating_mul(step_ms);
    let shift = TimeDelta::try_milliseconds(shift_ms).unwrap_or(if shift_ms < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    });
    let next = saturating_add(anchor, shift);
    // Sub-millisecond remainders are dropped by num_milliseconds
    if next < after {
        saturating_add(next, step)
    } else {
        next
    }
}

/// Last occurrence of the recurrence at or before `at`.
pub fn previous_occurrence(
    anchor: DateTime<Utc>,
    interval: Duration,
    at: DateTime<Utc>,
) -> DateTime<Utc> {
    let next = next_occurrence(anchor, interval, at);
    if next > at {
        saturating_add(next, -to_delta(interval))
    } else {
        next
    }
}

#[cfg(test)]
#[path = "recurrence_tests.rs"]
mod tests;
