//! Sample record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reminder category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Flight,
    Hotel,
    Activity,
    Location,
    Suggestion,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Flight => "flight",
            ReminderKind::Hotel => "hotel",
            ReminderKind::Activity => "activity",
            ReminderKind::Location => "location",
            ReminderKind::Suggestion => "suggestion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A travel reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub title: String,
    pub description: String,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub location: String,
    pub priority: Priority,
    pub completed: bool,
}

/// Action a client may request on a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    Complete,
    Snooze,
    Dismiss,
}

impl ReminderAction {
    /// Acknowledgement text returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            ReminderAction::Complete => "Reminder marked as completed",
            ReminderAction::Snooze => "Reminder snoozed",
            ReminderAction::Dismiss => "Reminder dismissed",
        }
    }
}

impl fmt::Display for ReminderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReminderAction::Complete => "complete",
            ReminderAction::Snooze => "snooze",
            ReminderAction::Dismiss => "dismiss",
        })
    }
}

impl FromStr for ReminderAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(ReminderAction::Complete),
            "snooze" => Ok(ReminderAction::Snooze),
            "dismiss" => Ok(ReminderAction::Dismiss),
            other => Err(format!(
                "Invalid action '{}'. Use 'complete', 'snooze' or 'dismiss'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A point of interest on the trip map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Map view: a default label, a center and its markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub location: String,
    pub center: Coordinate,
    pub markers: Vec<MapMarker>,
}
