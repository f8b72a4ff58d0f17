//! Championship standings models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Driver identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Driver {
    /// Bare identity used when upstream has nothing better
    pub fn with_id(driver_id: impl Into<String>) -> Self {
        Self {
            driver_id: Some(driver_id.into()),
            ..Default::default()
        }
    }

    /// "Given Family", falling back to whichever part exists, then the ID
    pub fn full_name(&self) -> String {
        match (self.given_name.as_deref(), self.family_name.as_deref()) {
            (Some(given), Some(family)) => format!("{} {}", given, family),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.driver_id.clone().unwrap_or_default(),
        }
    }

    pub fn has_id(&self, driver_id: &str) -> bool {
        self.driver_id.as_deref() == Some(driver_id)
    }
}

/// Constructor (team) identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Driver championship table after a given round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverStandingsList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,

    #[serde(default, rename = "DriverStandings")]
    pub driver_standings: Vec<DriverStanding>,
}

impl DriverStandingsList {
    /// Standing of the given driver
    pub fn find(&self, driver_id: &str) -> Option<&DriverStanding> {
        self.driver_standings
            .iter()
            .find(|s| s.driver.as_ref().is_some_and(|d| d.has_id(driver_id)))
    }

    pub fn contains(&self, driver_id: &str) -> bool {
        self.find(driver_id).is_some()
    }
}

/// A driver's championship position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins: Option<String>,

    #[serde(default, rename = "Driver", skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,

    /// Teams driven for this season, current team first
    #[serde(default, rename = "Constructors")]
    pub constructors: Vec<Constructor>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DriverStanding {
    /// Current team
    pub fn team(&self) -> Option<&Constructor> {
        self.constructors.first()
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team().and_then(|c| c.constructor_id.as_deref())
    }

    pub fn driver_id(&self) -> Option<&str> {
        self.driver.as_ref().and_then(|d| d.driver_id.as_deref())
    }
}

/// Constructor championship table after a given round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorStandingsList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,

    #[serde(default, rename = "ConstructorStandings")]
    pub constructor_standings: Vec<ConstructorStanding>,
}

/// A constructor's championship position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins: Option<String>,

    #[serde(default, rename = "Constructor", skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Constructor>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
