//! Schedule feed records.
//!
//! These types map directly to the unified bus/train schedule JSON. Buses
//! and trains share one record shape; fields only trains carry are optional.

use serde::{Deserialize, Deserializer, Serialize};

/// One scheduled departure as published in the feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// "bus" or "train". Missing means bus.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Bus operator or train name.
    pub name: String,

    /// Departure city.
    pub start: String,

    /// Arrival city.
    pub destination: String,

    /// Departure clock time, e.g. "08:00".
    pub start_time: String,

    /// Arrival clock time, e.g. "12:30".
    pub arrival_time: String,

    /// Ticket price.
    pub fare: f64,

    /// Trip length label such as "4:30h".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Single day the service does not run, or "None".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_day: Option<String>,

    /// Every day the service does not run. `null` means none.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub off_days: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
