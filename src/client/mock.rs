//! Mock upstream clients for testing
//!
//! Provides in-memory implementations of the upstream traits so the
//! scheduler, the adapter and the HTTP routes can be tested without
//! network access.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{
    ConstructorStandingsList, DriverStandingsList, Meeting, NewsArticle, Race, WeatherReading,
};
use super::{F1DataApi, LiveTimingApi, NewsApi, Upstreams};
use crate::error::{ApiError, Result};

/// Mock statistics API.
///
/// Unconfigured endpoints answer [`ApiError::NoData`]. Endpoints named in
/// the failure set answer [`ApiError::ServerError`] until cleared.
///
/// # Example
/// ```ignore
/// let mock = MockF1Client::new()
///     .with_schedule(fixtures::season_schedule(24, start))
///     .await
///     .with_failure("driver_standings")
///     .await;
/// ```
#[derive(Default)]
pub struct MockF1Client {
    schedule: Arc<Mutex<Option<Vec<Race>>>>,
    driver_standings: Arc<Mutex<Option<DriverStandingsList>>>,
    constructor_standings: Arc<Mutex<Option<ConstructorStandingsList>>>,
    latest_results: Arc<Mutex<Option<Race>>>,
    /// Driver ID -> races carrying that driver's result
    driver_results: Arc<Mutex<HashMap<String, Vec<Race>>>>,
    /// Driver ID -> races carrying that driver's qualifying
    driver_qualifying: Arc<Mutex<HashMap<String, Vec<Race>>>>,
    /// Method names that currently fail
    failing: Arc<Mutex<HashSet<&'static str>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<F1CallCounts>>,
}

/// Tracks statistics API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct F1CallCounts {
    pub schedule: usize,
    pub driver_standings: usize,
    pub constructor_standings: usize,
    pub latest_results: usize,
    pub driver_results: usize,
    pub driver_qualifying: usize,
}

impl F1CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.schedule
            + self.driver_standings
            + self.constructor_standings
            + self.latest_results
            + self.driver_results
            + self.driver_qualifying
    }
}

impl MockF1Client {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_schedule(self, races: Vec<Race>) -> Self {
        *self.schedule.lock().await = Some(races);
        self
    }

    pub async fn with_driver_standings(self, list: DriverStandingsList) -> Self {
        *self.driver_standings.lock().await = Some(list);
        self
    }

    pub async fn with_constructor_standings(self, list: ConstructorStandingsList) -> Self {
        *self.constructor_standings.lock().await = Some(list);
        self
    }

    pub async fn with_latest_results(self, race: Race) -> Self {
        *self.latest_results.lock().await = Some(race);
        self
    }

    pub async fn with_driver_results(self, driver_id: &str, races: Vec<Race>) -> Self {
        self.driver_results
            .lock()
            .await
            .insert(driver_id.to_string(), races);
        self
    }

    pub async fn with_driver_qualifying(self, driver_id: &str, races: Vec<Race>) -> Self {
        self.driver_qualifying
            .lock()
            .await
            .insert(driver_id.to_string(), races);
        self
    }

    /// Make `method` fail until [`MockF1Client::set_failing`] clears it.
    pub async fn with_failure(self, method: &'static str) -> Self {
        self.failing.lock().await.insert(method);
        self
    }

    /// Toggle failure of `method` on an already-shared mock.
    pub async fn set_failing(&self, method: &'static str, failing: bool) {
        let mut set = self.failing.lock().await;
        if failing {
            set.insert(method);
        } else {
            set.remove(method);
        }
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> F1CallCounts {
        self.call_count.lock().await.clone()
    }

    async fn check_error(&self, method: &'static str) -> Result<()> {
        if self.failing.lock().await.contains(method) {
            return Err(ApiError::ServerError(format!("{} unavailable", method)).into());
        }
        Ok(())
    }
}

fn configured<T: Clone>(value: &Option<T>, method: &str) -> Result<T> {
    value
        .clone()
        .ok_or_else(|| ApiError::NoData(format!("{} not configured", method)).into())
}

#[async_trait]
impl F1DataApi for MockF1Client {
    async fn schedule(&self, _season: &str) -> Result<Vec<Race>> {
        self.call_count.lock().await.schedule += 1;
        self.check_error("schedule").await?;
        configured(&*self.schedule.lock().await, "schedule")
    }

    async fn driver_standings(&self, _season: &str) -> Result<DriverStandingsList> {
        self.call_count.lock().await.driver_standings += 1;
        self.check_error("driver_standings").await?;
        configured(&*self.driver_standings.lock().await, "driver_standings")
    }

    async fn constructor_standings(&self, _season: &str) -> Result<ConstructorStandingsList> {
        self.call_count.lock().await.constructor_standings += 1;
        self.check_error("constructor_standings").await?;
        configured(
            &*self.constructor_standings.lock().await,
            "constructor_standings",
        )
    }

    async fn latest_results(&self) -> Result<Race> {
        self.call_count.lock().await.latest_results += 1;
        self.check_error("latest_results").await?;
        configured(&*self.latest_results.lock().await, "latest_results")
    }

    async fn driver_results(&self, driver_id: &str, _season: &str) -> Result<Vec<Race>> {
        self.call_count.lock().await.driver_results += 1;
        self.check_error("driver_results").await?;
        Ok(self
            .driver_results
            .lock()
            .await
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn driver_qualifying(&self, driver_id: &str, _season: &str) -> Result<Vec<Race>> {
        self.call_count.lock().await.driver_qualifying += 1;
        self.check_error("driver_qualifying").await?;
        Ok(self
            .driver_qualifying
            .lock()
            .await
            .get(driver_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock live-timing API
#[derive(Default)]
pub struct MockLiveTiming {
    meetings: Arc<Mutex<Vec<Meeting>>>,
    /// Meeting key -> latest reading
    weather: Arc<Mutex<HashMap<i64, WeatherReading>>>,
    failing: Arc<Mutex<bool>>,
    calls: Arc<Mutex<usize>>,
}

impl MockLiveTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_meetings(self, meetings: Vec<Meeting>) -> Self {
        *self.meetings.lock().await = meetings;
        self
    }

    pub async fn with_weather(self, meeting_key: i64, reading: WeatherReading) -> Self {
        self.weather.lock().await.insert(meeting_key, reading);
        self
    }

    pub async fn with_failure(self) -> Self {
        *self.failing.lock().await = true;
        self
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }

    async fn check_error(&self) -> Result<()> {
        *self.calls.lock().await += 1;
        if *self.failing.lock().await {
            return Err(ApiError::Network("live timing unreachable".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl LiveTimingApi for MockLiveTiming {
    async fn meetings(&self, _year: i32) -> Result<Vec<Meeting>> {
        self.check_error().await?;
        Ok(self.meetings.lock().await.clone())
    }

    async fn weather(&self, meeting_key: i64) -> Result<WeatherReading> {
        self.check_error().await?;
        self.weather
            .lock()
            .await
            .get(&meeting_key)
            .cloned()
            .ok_or_else(|| ApiError::NoData(format!("no weather for {}", meeting_key)).into())
    }
}

/// Mock news aggregator
#[derive(Default)]
pub struct MockNews {
    articles: Arc<Mutex<Option<Vec<NewsArticle>>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockNews {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_articles(self, articles: Vec<NewsArticle>) -> Self {
        *self.articles.lock().await = Some(articles);
        self
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl NewsApi for MockNews {
    async fn news(&self) -> Result<Vec<NewsArticle>> {
        *self.calls.lock().await += 1;
        configured(&*self.articles.lock().await, "news")
    }
}

/// Bundle mocks into the upstream set, keeping typed handles for assertions.
pub fn upstreams(
    f1: Arc<MockF1Client>,
    live: Arc<MockLiveTiming>,
    news: Arc<MockNews>,
) -> Upstreams {
    Upstreams { f1, live, news }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_unconfigured_is_no_data() {
        let mock = MockF1Client::new();
        let err = mock.schedule("current").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NoData(_))));
        assert_eq!(mock.call_counts().await.schedule, 1);
    }

    #[tokio::test]
    async fn test_mock_failure_toggle() {
        let mock = MockF1Client::new()
            .with_schedule(Vec::new())
            .await
            .with_failure("schedule")
            .await;

        assert!(mock.schedule("current").await.is_err());

        mock.set_failing("schedule", false).await;
        assert!(mock.schedule("current").await.unwrap().is_empty());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_driver_results_by_id() {
        let mock = MockF1Client::new()
            .with_driver_results("alonso", vec![Race::default(), Race::default()])
            .await;

        assert_eq!(mock.driver_results("alonso", "current").await.unwrap().len(), 2);
        assert!(mock.driver_results("stroll", "current").await.unwrap().is_empty());
    }
}
