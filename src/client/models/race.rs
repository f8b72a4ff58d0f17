//! Race, result and qualifying models (Ergast/Jolpica shape)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Constructor, Driver};

/// Start time assumed when a race has a date but no time
const DEFAULT_START_TIME: &str = "00:00:00Z";

/// A race weekend from the season schedule or a results query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,

    #[serde(default, rename = "Circuit", skip_serializing_if = "Option::is_none")]
    pub circuit: Option<Circuit>,

    /// Race day (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Race start (HH:MM:SSZ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Present only on sprint weekends
    #[serde(default, rename = "Sprint", skip_serializing_if = "Option::is_none")]
    pub sprint: Option<SessionTime>,

    #[serde(default, rename = "Results", skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<RaceResult>,

    #[serde(
        default,
        rename = "QualifyingResults",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub qualifying_results: Vec<QualifyingResult>,

    /// Upstream fields passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Race {
    /// Scheduled start as a UTC instant, if the date (and time) parse.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        let date = self.date.as_deref()?;
        let time = self.time.as_deref().unwrap_or(DEFAULT_START_TIME);
        DateTime::parse_from_rfc3339(&format!("{}T{}", date, time))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the race starts strictly after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|start| start > now)
    }

    pub fn is_sprint_weekend(&self) -> bool {
        self.sprint.is_some()
    }
}

/// Date and time of a weekend session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Circuit a race is held on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One driver's classified result in a race
///
/// Numeric fields arrive as strings and are parsed by the statistics engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,

    #[serde(default, rename = "Driver", skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,

    #[serde(default, rename = "Constructor", skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Constructor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laps: Option<String>,

    /// "Finished", "+1 Lap", or a retirement reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, rename = "Time", skip_serializing_if = "Option::is_none")]
    pub time: Option<ResultTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Race time of a classified finisher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millis: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// One driver's qualifying result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualifyingResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, rename = "Driver", skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,

    #[serde(default, rename = "Constructor", skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Constructor>,

    #[serde(default, rename = "Q1", skip_serializing_if = "Option::is_none")]
    pub q1: Option<String>,

    #[serde(default, rename = "Q2", skip_serializing_if = "Option::is_none")]
    pub q2: Option<String>,

    #[serde(default, rename = "Q3", skip_serializing_if = "Option::is_none")]
    pub q3: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
