//! Startup and migration specs
//!
//! Verify that stored records are brought to the current version before
//! anything is scheduled, and how migration chains behave.

use crate::prelude::*;
use garden_core::migrate::UNKNOWN_MIGRATION;
use garden_core::{IncrementVersion, Migrations, NotificationSettings, Versioned};
use similar_asserts::assert_eq;
use std::convert::Infallible;

#[tokio::test]
async fn unversioned_records_are_migrated_and_scheduled() {
    let world = World::at(june_1(12, 0));
    let mut garden = lit_garden("18:00:00Z", hours(6));
    garden.version = 0;
    garden.notification_client_id = Some(ResourceId::new());
    let mut ws = daily_water_schedule();
    ws.version = 0;
    world.gardens.set(&garden).await.unwrap();
    world.water_schedules.set(&ws).await.unwrap();

    let report = world.runtime.startup().await.unwrap();

    let stored = world.gardens.snapshot(garden.id).unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(
        stored.notification_settings,
        Some(NotificationSettings {
            controller_startup: true,
            light_schedule: true,
        })
    );
    assert_eq!(world.water_schedules.snapshot(ws.id).unwrap().version, 1);
    assert_eq!(report.gardens.migrated, 1);
    assert_eq!(report.water_schedules.migrated, 1);
    assert_eq!(report.scheduled_gardens, 1);
    assert_eq!(report.scheduled_water_schedules, 1);
    assert_eq!(
        world.runtime.next_light_time(garden.id, LightState::On),
        Some(june_1(18, 0))
    );

    world.runtime.shutdown();
}

#[tokio::test]
async fn gardens_without_notification_client_keep_settings_unset() {
    let world = World::at(june_1(12, 0));
    let mut garden = lit_garden("18:00:00Z", hours(6));
    garden.version = 0;
    world.gardens.set(&garden).await.unwrap();

    world.runtime.startup().await.unwrap();

    let stored = world.gardens.snapshot(garden.id).unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.notification_settings, None);

    world.runtime.shutdown();
}

#[derive(Debug)]
struct V1 {
    val: u32,
    version: u32,
}

#[derive(Debug)]
struct V2 {
    val: u32,
    version: u32,
}

#[derive(Debug)]
struct V3 {
    val: u32,
    version: u32,
}

macro_rules! versioned {
    ($($ty:ident),*) => {$(
        impl Versioned for $ty {
            fn version(&self) -> u32 {
                self.version
            }

            fn as_increment_version(&mut self) -> Option<&mut dyn IncrementVersion> {
                Some(self)
            }
        }

        impl IncrementVersion for $ty {
            fn set_version(&mut self, version: u32) {
                self.version = version;
            }
        }
    )*};
}

versioned!(V1, V2, V3);

fn chain() -> Migrations {
    Migrations::starting_at(1)
        .then("V1toV2", |v: V1| {
            Ok::<_, Infallible>(V2 {
                val: v.val + 1,
                version: v.version,
            })
        })
        .then("V2toV3", |v: V2| {
            Ok::<_, Infallible>(V3 {
                val: v.val + 1,
                version: v.version,
            })
        })
}

#[test]
fn migrations_chain_to_the_last_version() {
    let migrated = chain()
        .run_to_target::<V3>(Box::new(V1 { val: 0, version: 1 }))
        .unwrap();

    assert_eq!(migrated.version, 3);
    assert_eq!(migrated.val, 2);
}

#[test]
fn migrating_past_the_registered_chain_is_not_found() {
    let short = Migrations::starting_at(1).then("V1toV2", |v: V1| {
        Ok::<_, Infallible>(V2 {
            val: v.val + 1,
            version: v.version,
        })
    });

    let err = short
        .run_to_target::<V3>(Box::new(V1 { val: 0, version: 1 }))
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.name, UNKNOWN_MIGRATION);
    assert_eq!(err.version, 2);
}

#[test]
fn lazy_migration_stops_when_the_consumer_does() {
    let migrations = chain();
    let records = (0..3).map(|val| V1 { val, version: 1 });

    let first: Vec<V3> = migrations
        .each::<V1, V3, _>(records)
        .take(1)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].val, 2);
}
