//! Watering progress specs
//!
//! Verify the progress reported from a zone's newest watering events.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn now() -> DateTime<Utc> {
    june_1(12, 0)
}

fn ago(minutes: i64) -> DateTime<Utc> {
    now() - TimeDelta::minutes(minutes)
}

#[tokio::test]
async fn halfway_through_a_watering() {
    let world = World::at(now());
    let zone = ResourceId::new();
    world
        .history
        .push(zone, WaterHistory::sent("a", minutes(30), ago(16)).started(ago(15)));

    let progress = world.runtime.water_progress(zone).await.unwrap();

    assert_eq!(progress.progress, 0.5);
    assert_eq!(progress.elapsed, minutes(15));
    assert_eq!(progress.duration, minutes(30));
    assert_eq!(progress.queue, 0);
    assert_eq!(progress.error, None);
}

#[tokio::test]
async fn watering_that_ran_too_long_is_an_anomaly() {
    let world = World::at(now());
    let zone = ResourceId::new();
    world
        .history
        .push(zone, WaterHistory::sent("a", minutes(30), ago(46)).started(ago(45)));

    let progress = world.runtime.water_progress(zone).await.unwrap();

    assert_eq!(progress.error, Some(ProgressError::ElapsedExceedsDuration));
    assert_eq!(progress.progress, 0.0);
}

#[tokio::test]
async fn old_completion_is_not_shown() {
    let world = World::at(now());
    let zone = ResourceId::new();
    world.history.push(
        zone,
        WaterHistory::sent("a", minutes(30), ago(122))
            .started(ago(121))
            .completed(ago(91)),
    );
    world.history.push(zone, WaterHistory::sent("b", minutes(30), ago(2)));

    let progress = world.runtime.water_progress(zone).await.unwrap();

    assert_eq!(progress, WaterHistoryProgress::default());
}

#[tokio::test]
async fn queued_watering_that_never_started_is_an_anomaly() {
    let world = World::at(now());
    let zone = ResourceId::new();
    world.history.push(
        zone,
        WaterHistory::sent("a", minutes(30), ago(32))
            .started(ago(31))
            .completed(ago(1)),
    );
    world.history.push(zone, WaterHistory::sent("b", minutes(30), ago(2)));

    let progress = world.runtime.water_progress(zone).await.unwrap();

    assert_eq!(progress.error, Some(ProgressError::SentButNotStarted));
    assert_eq!(progress.queue, 1);
}

#[tokio::test]
async fn queued_events_are_counted() {
    let world = World::at(now());
    let zone = ResourceId::new();
    world
        .history
        .push(zone, WaterHistory::sent("a", minutes(30), ago(11)).started(ago(10)));
    world.history.push(zone, WaterHistory::sent("b", minutes(30), ago(5)));
    world.history.push(zone, WaterHistory::sent("c", minutes(30), ago(4)));

    let progress = world.runtime.water_progress(zone).await.unwrap();

    assert_eq!(progress.queue, 2);
    assert_eq!(progress.elapsed, minutes(10));
    assert_eq!(progress.error, None);
}
