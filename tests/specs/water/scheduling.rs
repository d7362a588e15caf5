//! Water scheduling specs
//!
//! Verify that each water schedule keeps exactly one recurring timer.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn june_2_at_6() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 2, 6, 0, 0).unwrap()
}

#[tokio::test]
async fn saving_a_schedule_twice_leaves_one_timer() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();

    world.save_water_schedule(&ws).await;
    world.save_water_schedule(&ws).await;

    assert_eq!(world.runtime.scheduler().jobs(ws.id).len(), 1);
    assert_eq!(world.runtime.scheduler().next_run(ws.id), Some(june_2_at_6()));
}

#[tokio::test]
async fn removing_a_removed_tag_succeeds() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    world.save_water_schedule(&ws).await;

    world.runtime.scheduler().remove_by_tag(ws.id);
    world.runtime.scheduler().remove_by_tag(ws.id);

    assert_eq!(world.runtime.scheduler().next_run(ws.id), None);
}

#[tokio::test]
async fn schedule_waters_once_per_interval() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    let zone = world.zone_using(&ws, 1).await;
    world.save_water_schedule(&ws).await;

    world.run_at(june_2_at_6()).await;
    world.run_at(june_2_at_6() + TimeDelta::hours(12)).await;
    world.run_at(june_2_at_6() + TimeDelta::days(1)).await;

    let watering = DispatchCall::Water {
        garden_id: zone.garden_id,
        zone_id: zone.id,
        position: 1,
        duration: minutes(30),
    };
    assert_eq!(world.dispatch.calls(), vec![watering.clone(), watering]);
}

#[tokio::test]
async fn shared_schedule_waters_each_zone() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    let first = world.zone_using(&ws, 0).await;
    let second = world.zone_using(&ws, 1).await;
    world.save_water_schedule(&ws).await;

    world.run_at(june_2_at_6()).await;

    let mut zones: Vec<_> = world
        .dispatch
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            DispatchCall::Water { zone_id, .. } => Some(zone_id),
            _ => None,
        })
        .collect();
    zones.sort();
    let mut expected = vec![first.id, second.id];
    expected.sort();
    assert_eq!(zones, expected);
}

#[tokio::test]
async fn schedule_without_zones_sends_nothing() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    world.save_water_schedule(&ws).await;

    world.run_at(june_2_at_6()).await;

    assert!(world.dispatch.calls().is_empty());
    assert_eq!(
        world.runtime.scheduler().next_run(ws.id),
        Some(june_2_at_6() + TimeDelta::days(1))
    );
}

#[tokio::test]
async fn end_dated_schedule_is_not_scheduled() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    world.save_water_schedule(&ws).await;

    let retired = ws.with_end_date(june_1(11, 0));
    world.save_water_schedule(&retired).await;

    assert_eq!(world.runtime.scheduler().next_run(retired.id), None);
    assert_eq!(world.runtime.next_water_time(&retired), None);
}

#[tokio::test]
async fn deleted_schedule_stops_watering() {
    let world = World::at(june_1(12, 0));
    let ws = daily_water_schedule();
    world.zone_using(&ws, 0).await;
    world.save_water_schedule(&ws).await;

    world
        .runtime
        .handle_event(ResourceEvent::WaterScheduleDeleted(ws.id))
        .await
        .unwrap();
    world.run_at(june_2_at_6()).await;

    assert!(world.dispatch.calls().is_empty());
}
