//! Read-only sample data for the map and reminders routes.
//!
//! Handlers see only the `SampleSource` trait; the bundled fixtures are one
//! implementation and tests supply their own.

pub mod types;

use serde::de::DeserializeOwned;

pub use types::{
    Coordinate, MapData, MapMarker, Priority, ReminderAction, ReminderKind, ReminderRecord,
};

/// Immutable fixture data.
pub trait SampleSource: Send + Sync {
    fn reminders(&self) -> Vec<ReminderRecord>;
    fn map_data(&self) -> MapData;
}

const REMINDERS_JSON: &str = include_str!("fixtures/reminders.json");
const MAP_JSON: &str = include_str!("fixtures/map.json");

/// In-memory sample set, by default the bundled fixtures.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    reminders: Vec<ReminderRecord>,
    map: MapData,
}

impl FixtureSource {
    pub fn new(reminders: Vec<ReminderRecord>, map: MapData) -> Self {
        Self { reminders, map }
    }

    /// Parse the fixtures compiled into the binary.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Ok(Self {
            reminders: parse(REMINDERS_JSON)?,
            map: parse(MAP_JSON)?,
        })
    }
}

fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

impl SampleSource for FixtureSource {
    fn reminders(&self) -> Vec<ReminderRecord> {
        self.reminders.clone()
    }

    fn map_data(&self) -> MapData {
        self.map.clone()
    }
}

/// Keep reminders whose type equals `kind` exactly. `None` keeps all.
pub fn filter_reminders(records: Vec<ReminderRecord>, kind: Option<&str>) -> Vec<ReminderRecord> {
    match kind {
        Some(kind) => records.into_iter().filter(|r| r.kind.as_str() == kind).collect(),
        None => records,
    }
}

/// Keep markers whose type equals `kind` exactly. `None` keeps all.
pub fn filter_markers(markers: Vec<MapMarker>, kind: Option<&str>) -> Vec<MapMarker> {
    match kind {
        Some(kind) => markers.into_iter().filter(|m| m.kind == kind).collect(),
        None => markers,
    }
}
