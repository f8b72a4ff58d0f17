//! OpenF1 live-timing models

use serde::{Deserialize, Serialize};

/// A race meeting (weekend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub meeting_key: Option<i64>,

    #[serde(default)]
    pub meeting_name: Option<String>,

    #[serde(default)]
    pub circuit_short_name: Option<String>,

    #[serde(default)]
    pub country_name: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,
}

/// A session within a meeting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub session_key: Option<i64>,

    #[serde(default)]
    pub session_name: Option<String>,

    #[serde(default)]
    pub date_start: Option<String>,
}

/// One weather sample from the track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// ISO 8601 sample time
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub air_temperature: Option<f64>,

    #[serde(default)]
    pub track_temperature: Option<f64>,

    #[serde(default)]
    pub humidity: Option<f64>,

    #[serde(default)]
    pub pressure: Option<f64>,

    #[serde(default)]
    pub rainfall: Option<f64>,

    #[serde(default)]
    pub wind_direction: Option<f64>,

    #[serde(default)]
    pub wind_speed: Option<f64>,

    #[serde(default)]
    pub session_key: Option<i64>,

    #[serde(default)]
    pub meeting_key: Option<i64>,
}
