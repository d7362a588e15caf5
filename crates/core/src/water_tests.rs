// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::weather::ScaleControl;
use chrono::TimeZone;
use yare::parameterized;

fn schedule() -> WaterSchedule {
    WaterSchedule::new(
        ResourceId::new(),
        Duration::from_secs(30 * 60),
        Duration::from_secs(24 * 60 * 60),
        Utc.with_ymd_and_hms(2026, 1, 1, 6, 0, 0).unwrap(),
    )
}

fn in_month(month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap()
}

#[parameterized(
    inside = { Month::April, Month::October, 6, true },
    first_month = { Month::April, Month::October, 4, true },
    last_month = { Month::April, Month::October, 10, true },
    before = { Month::April, Month::October, 3, false },
    after = { Month::April, Month::October, 11, false },
    wrapped_december = { Month::November, Month::February, 12, true },
    wrapped_january = { Month::November, Month::February, 1, true },
    wrapped_summer = { Month::November, Month::February, 7, false },
)]
fn active_period_contains_months_inclusively(
    start: Month,
    end: Month,
    month: u32,
    expected: bool,
) {
    let ws = schedule().with_active_period(ActivePeriod::new(start, end));
    assert_eq!(ws.is_active(in_month(month)), expected);
}

#[test]
fn without_active_period_always_active() {
    assert!(schedule().is_active(in_month(2)));
}

#[test]
fn validate_rejects_zero_interval() {
    let ws = WaterSchedule {
        interval: Duration::ZERO,
        ..schedule()
    };
    assert_eq!(
        ws.validate(),
        Err(ValidationError::ZeroDuration("interval"))
    );
}

#[test]
fn validate_rejects_interval_past_the_calendar() {
    let ws = WaterSchedule {
        interval: Duration::from_secs(400_000 * 365 * 24 * 60 * 60),
        ..schedule()
    };
    assert_eq!(
        ws.validate(),
        Err(ValidationError::DurationOutOfRange("interval"))
    );
}

#[test]
fn validate_rejects_zero_duration() {
    let ws = WaterSchedule {
        duration: Duration::ZERO,
        ..schedule()
    };
    assert_eq!(
        ws.validate(),
        Err(ValidationError::ZeroDuration("duration"))
    );
}

#[test]
fn validate_rejects_same_start_and_end_month() {
    let ws = schedule().with_active_period(ActivePeriod::new(Month::May, Month::May));
    assert_eq!(ws.validate(), Err(ValidationError::EmptyActivePeriod));
}

#[test]
fn validate_checks_weather_control() {
    let ws = schedule().with_weather_control(WeatherControl {
        rain: None,
        temperature: Some(ScaleControl::new(30.0, 0.5, 0.0, ResourceId::new())),
    });
    assert!(matches!(
        ws.validate(),
        Err(ValidationError::NonPositiveRange { .. })
    ));
}

#[test]
fn empty_weather_control_is_not_weather_controlled() {
    let ws = schedule().with_weather_control(WeatherControl::default());
    assert!(!ws.has_weather_control());
}

#[test]
fn end_dated_only_once_end_date_has_passed() {
    let end = in_month(3);
    let ws = schedule().with_end_date(end);
    assert!(!ws.is_end_dated(end));
    assert!(ws.is_end_dated(end + chrono::TimeDelta::seconds(1)));
}

#[test]
fn serializes_durations_as_human_strings() {
    let json = serde_json::to_value(schedule()).unwrap();
    assert_eq!(json["duration"], "30m");
    assert_eq!(json["interval"], "1day");
    assert!(json.get("end_date").is_none());
}

#[parameterized(
    later_this_year = { Month::June, Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap(), Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap() },
    wraps_to_next_year = { Month::March, Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(), Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap() },
    same_month_already_started = { Month::July, Utc.with_ymd_and_hms(2026, 7, 2, 0, 0, 0).unwrap(), Utc.with_ymd_and_hms(2027, 7, 1, 0, 0, 0).unwrap() },
    exactly_at_start = { Month::July, Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(), Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap() },
)]
fn next_start_of_active_period(start_month: Month, after: DateTime<Utc>, expected: DateTime<Utc>) {
    let period = ActivePeriod::new(start_month, Month::September);
    assert_eq!(period.next_start(after), Some(expected));
}
