// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration lists for each persisted record family

use super::Migrations;
use crate::garden::{Garden, NotificationSettings, Zone};
use crate::water::WaterSchedule;
use std::convert::Infallible;

/// Records written before versioning existed are stamped as version 1 as-is
fn initialize_version_1<R>(record: R) -> Result<R, Infallible> {
    Ok(record)
}

/// Gardens with a notification client get startup and light notifications
fn enable_notifications_if_client_is_set(mut garden: Garden) -> Result<Garden, Infallible> {
    if garden.notification_client_id.is_some() {
        garden.notification_settings = Some(NotificationSettings {
            controller_startup: true,
            light_schedule: true,
        });
    }
    Ok(garden)
}

pub fn garden_migrations() -> Migrations {
    Migrations::new()
        .then("InitializeVersion1", initialize_version_1::<Garden>)
        .then(
            "EnableNotificationsIfClientIsSet",
            enable_notifications_if_client_is_set,
        )
}

pub fn zone_migrations() -> Migrations {
    Migrations::new().then("InitializeVersion1", initialize_version_1::<Zone>)
}

pub fn water_schedule_migrations() -> Migrations {
    Migrations::new().then("InitializeVersion1", initialize_version_1::<WaterSchedule>)
}

#[cfg(test)]
#[path = "migrations_tests.rs"]
mod tests;
