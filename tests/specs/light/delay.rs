//! Light delay specs
//!
//! Verify that delays keep the light OFF longer, stack within one off-window
//! and never run into the next cycle.

use crate::prelude::*;
use similar_asserts::assert_eq;

async fn world_with_garden(duration: Duration) -> (World, Garden) {
    let world = World::at(june_1(12, 0));
    let garden = lit_garden("18:00:00Z", duration);
    world.save_garden(&garden).await;
    (world, garden)
}

#[tokio::test]
async fn two_delays_push_the_next_on_by_their_sum() {
    let (world, garden) = world_with_garden(hours(6)).await;
    let delay = LightAction::off_for(minutes(30));

    let first = world.runtime.execute_light_action(garden.id, &delay).await.unwrap();
    let second = world.runtime.execute_light_action(garden.id, &delay).await.unwrap();

    assert_eq!(first, Some(june_1(18, 30)));
    assert_eq!(second, Some(june_1(19, 0)));
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(19, 0))
    );
}

#[tokio::test]
async fn delay_longer_than_the_on_cycle_fails() {
    let (world, garden) = world_with_garden(hours(6)).await;

    let err = world
        .runtime
        .execute_light_action(garden.id, &LightAction::off_for(hours(7)))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "unable to execute delay that lasts longer than light_schedule"
    );
    assert!(world.dispatch.calls().is_empty());
}

#[tokio::test]
async fn delay_requires_off_state() {
    let (world, garden) = world_with_garden(hours(6)).await;
    let action = LightAction {
        state: LightState::On,
        for_duration: Some(minutes(30)),
    };

    let err = world
        .runtime
        .execute_light_action(garden.id, &action)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unable to use delay when state is not OFF");
}

#[tokio::test]
async fn delay_may_fill_the_whole_on_window_but_not_more() {
    let (world, garden) = world_with_garden(hours(6)).await;

    let next_on = world
        .runtime
        .execute_light_action(garden.id, &LightAction::off_for(hours(6)))
        .await
        .unwrap();
    assert_eq!(next_on, Some(june_1(0, 0) + TimeDelta::days(1)));

    let err = world
        .runtime
        .execute_light_action(garden.id, &LightAction::off_for(minutes(1)))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unable to schedule delay that extends past the light turning back on"
    );
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(0, 0) + TimeDelta::days(1))
    );
}

#[tokio::test]
async fn delayed_light_turns_on_at_the_new_time() {
    let (world, garden) = world_with_garden(hours(6)).await;
    world
        .runtime
        .execute_light_action(garden.id, &LightAction::off_for(minutes(30)))
        .await
        .unwrap();

    world.run_at(june_1(18, 0)).await;
    assert_eq!(world.dispatch.light_states(), vec![LightState::Off]);

    world.run_at(june_1(18, 30)).await;
    assert_eq!(
        world.dispatch.light_states(),
        vec![LightState::Off, LightState::On]
    );
}
