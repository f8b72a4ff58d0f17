//! Upstream API clients
//!
//! Each upstream sits behind a trait so the scheduler, the request adapter
//! and tests can swap real HTTP clients for mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
pub mod jolpica;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod news;
pub mod openf1;
pub mod parallel;

pub use jolpica::JolpicaClient;
pub use models::{
    ConstructorStandingsList, DriverStandingsList, Meeting, NewsArticle, Race, WeatherReading,
};
pub use news::NewsClient;
pub use openf1::OpenF1Client;

/// Season statistics API (Jolpica, Ergast-compatible)
#[async_trait]
pub trait F1DataApi: Send + Sync {
    /// All race weekends of a season
    async fn schedule(&self, season: &str) -> Result<Vec<Race>>;

    /// Latest driver championship table
    async fn driver_standings(&self, season: &str) -> Result<DriverStandingsList>;

    /// Latest constructor championship table
    async fn constructor_standings(&self, season: &str) -> Result<ConstructorStandingsList>;

    /// Most recent race with its full classification
    async fn latest_results(&self) -> Result<Race>;

    /// Races of a season, each carrying only this driver's result
    async fn driver_results(&self, driver_id: &str, season: &str) -> Result<Vec<Race>>;

    /// Races of a season, each carrying only this driver's qualifying result
    async fn driver_qualifying(&self, driver_id: &str, season: &str) -> Result<Vec<Race>>;
}

/// Live timing API (OpenF1)
#[async_trait]
pub trait LiveTimingApi: Send + Sync {
    /// Meetings held in a calendar year
    async fn meetings(&self, year: i32) -> Result<Vec<Meeting>>;

    /// Latest weather reading from the meeting's most recent session
    async fn weather(&self, meeting_key: i64) -> Result<WeatherReading>;
}

/// Aggregated motorsport news
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Deduplicated headlines, newest first
    async fn news(&self) -> Result<Vec<NewsArticle>>;
}

/// The set of upstream collaborators the core depends on
#[derive(Clone)]
pub struct Upstreams {
    pub f1: Arc<dyn F1DataApi>,
    pub live: Arc<dyn LiveTimingApi>,
    pub news: Arc<dyn NewsApi>,
}
