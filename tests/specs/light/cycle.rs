//! Light cycle specs
//!
//! Verify daily ON/OFF transitions and one-off ad-hoc ON times.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn light_turns_on_and_off_every_day() {
    let world = World::at(june_1(12, 0));
    let garden = lit_garden("18:00:00Z", hours(6));
    world.save_garden(&garden).await;

    world.run_at(june_1(18, 0)).await;
    world.run_at(june_1(23, 59)).await;
    world.run_at(june_1(18, 0) + TimeDelta::hours(6)).await;

    assert_eq!(
        world.dispatch.light_states(),
        vec![LightState::On, LightState::Off]
    );
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(18, 0) + TimeDelta::days(1))
    );
}

#[tokio::test]
async fn start_time_offset_is_respected() {
    let world = World::at(june_1(12, 0));
    let garden = lit_garden("20:00:00-04:00", hours(4));
    world.save_garden(&garden).await;

    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(0, 0) + TimeDelta::days(1))
    );
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::Off),
        Some(june_1(4, 0) + TimeDelta::days(1))
    );
}

#[tokio::test]
async fn adhoc_on_time_replaces_the_next_on_once() {
    let world = World::at(june_1(12, 0));
    let mut garden = lit_garden("18:00:00Z", hours(6));
    if let Some(ls) = garden.light_schedule.as_mut() {
        ls.adhoc_on_time = Some(june_1(20, 0));
    }
    world.save_garden(&garden).await;

    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(20, 0))
    );

    world.run_at(june_1(18, 0)).await;
    world.run_at(june_1(20, 0)).await;

    assert_eq!(world.dispatch.light_states(), vec![LightState::On]);
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(18, 0) + TimeDelta::days(1))
    );
}

#[tokio::test]
async fn deleted_garden_has_no_next_time() {
    let world = World::at(june_1(12, 0));
    let garden = lit_garden("18:00:00Z", hours(6));
    world.save_garden(&garden).await;

    world
        .runtime
        .handle_event(ResourceEvent::GardenDeleted(garden.id))
        .await
        .unwrap();

    assert_eq!(world.runtime.next_light_time(garden.id, LightState::On), None);
    assert_eq!(world.runtime.next_light_time(garden.id, LightState::Off), None);
}
