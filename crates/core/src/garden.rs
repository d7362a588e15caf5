// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gardens and zones

use crate::error::ValidationError;
use crate::id::ResourceId;
use crate::light::LightSchedule;
use crate::migrate::{IncrementVersion, Versioned};
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version stamped on newly created gardens
pub const CURRENT_GARDEN_VERSION: u32 = 2;

/// Version stamped on newly created zones
pub const CURRENT_ZONE_VERSION: u32 = 1;

/// Which controller events produce a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub controller_startup: bool,
    #[serde(default)]
    pub light_schedule: bool,
}

/// A controller and the light cycle it drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Prefix of every topic the controller listens on
    pub topic_prefix: String,
    #[serde(default)]
    pub max_zones: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_schedule: Option<LightSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_client_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u32,
}

impl Garden {
    pub fn new(id: ResourceId, topic_prefix: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            topic_prefix: topic_prefix.into(),
            max_zones: 0,
            light_schedule: None,
            notification_client_id: None,
            notification_settings: None,
            end_date: None,
            version: CURRENT_GARDEN_VERSION,
        }
    }

    pub fn with_light_schedule(mut self, light_schedule: LightSchedule) -> Self {
        self.light_schedule = Some(light_schedule);
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.light_schedule {
            Some(ls) => ls.validate(),
            None => Ok(()),
        }
    }
}

impl Record for Garden {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

impl Versioned for Garden {
    fn version(&self) -> u32 {
        self.version
    }

    fn as_increment_version(&mut self) -> Option<&mut dyn IncrementVersion> {
        Some(self)
    }
}

impl IncrementVersion for Garden {
    fn set_version(&mut self, version: u32) {
        self.version = version;
    }
}

/// A single valve output of a garden's controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ResourceId,
    pub garden_id: ResourceId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Index of the valve on the controller
    pub position: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub water_schedule_ids: Vec<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u32,
}

impl Zone {
    pub fn new(id: ResourceId, garden_id: ResourceId, position: u32) -> Self {
        Self {
            id,
            garden_id,
            name: String::new(),
            position,
            water_schedule_ids: Vec::new(),
            end_date: None,
            version: CURRENT_ZONE_VERSION,
        }
    }
}

impl Record for Zone {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

impl Versioned for Zone {
    fn version(&self) -> u32 {
        self.version
    }

    fn as_increment_version(&mut self) -> Option<&mut dyn IncrementVersion> {
        Some(self)
    }
}

impl IncrementVersion for Zone {
    fn set_version(&mut self, version: u32) {
        self.version = version;
    }
}
