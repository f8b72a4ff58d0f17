//! JSON report envelope for one-shot commands
//!
//! Every command prints one object: what ran, for which season, when, and
//! the domain payload under `data`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A command's JSON report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReport<'a, T: ?Sized> {
    pub command: &'a str,
    pub season: &'a str,
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    pub data: &'a T,
}

impl<'a, T: ?Sized> CommandReport<'a, T> {
    pub fn new(command: &'a str, season: &'a str, data: &'a T) -> Self {
        Self {
            command,
            season,
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            data,
        }
    }
}

/// Pretty-print `data` inside a [`CommandReport`].
pub fn format_report<T: Serialize + ?Sized>(
    command: &str,
    season: &str,
    data: &T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CommandReport::new(command, season, data))
}
