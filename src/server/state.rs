//! Shared state for route handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::{CacheOrFetch, Served, TtlCache, key};
use crate::client::models::{ConstructorStandingsList, DriverStandingsList, Meeting, NewsArticle};
use crate::client::{Race, Upstreams};
use crate::error::{ApiError, Result};
use crate::stats::{
    DriverDossier, ScenarioForecast, compute_driver_dossier, compute_scenario_forecast,
};

/// State passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub fetcher: CacheOrFetch,
    pub upstreams: Upstreams,

    /// Season identifier passed to Jolpica
    pub season: Arc<str>,

    /// Driver always admitted to the dossier route
    pub focus_driver: Arc<str>,

    /// Drivers included in scenario forecasts
    pub scenario_top_n: usize,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        fetcher: CacheOrFetch,
        upstreams: Upstreams,
        season: &str,
        focus_driver: &str,
        scenario_top_n: usize,
    ) -> Self {
        let started_at = fetcher.cache().now();
        Self {
            fetcher,
            upstreams,
            season: season.into(),
            focus_driver: focus_driver.into(),
            scenario_top_n,
            started_at,
        }
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        self.fetcher.cache()
    }

    /// Current time on the cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.cache().now()
    }

    pub async fn schedule(&self) -> Result<Served<Vec<Race>>> {
        let (f1, season) = (self.upstreams.f1.clone(), self.season.clone());
        self.fetcher
            .get_or_fetch_as(key::SCHEDULE, || async move { f1.schedule(&season).await })
            .await
    }

    pub async fn driver_standings(&self) -> Result<Served<DriverStandingsList>> {
        let (f1, season) = (self.upstreams.f1.clone(), self.season.clone());
        self.fetcher
            .get_or_fetch_as(key::DRIVER_STANDINGS, || async move {
                f1.driver_standings(&season).await
            })
            .await
    }

    pub async fn constructor_standings(&self) -> Result<Served<ConstructorStandingsList>> {
        let (f1, season) = (self.upstreams.f1.clone(), self.season.clone());
        self.fetcher
            .get_or_fetch_as(key::CONSTRUCTOR_STANDINGS, || async move {
                f1.constructor_standings(&season).await
            })
            .await
    }

    pub async fn latest_results(&self) -> Result<Served<Race>> {
        let f1 = self.upstreams.f1.clone();
        self.fetcher
            .get_or_fetch_as(key::LAST_RACE_RESULTS, || async move {
                f1.latest_results().await
            })
            .await
    }

    pub async fn news(&self) -> Result<Served<Vec<NewsArticle>>> {
        let news = self.upstreams.news.clone();
        self.fetcher
            .get_or_fetch_as(key::NEWS, || async move { news.news().await })
            .await
    }

    pub async fn driver_results(&self, driver_id: &str) -> Result<Served<Vec<Race>>> {
        let (f1, season) = (self.upstreams.f1.clone(), self.season.clone());
        self.fetcher
            .get_or_fetch_as(&key::driver_results(driver_id), || async move {
                f1.driver_results(driver_id, &season).await
            })
            .await
    }

    pub async fn driver_qualifying(&self, driver_id: &str) -> Result<Served<Vec<Race>>> {
        let (f1, season) = (self.upstreams.f1.clone(), self.season.clone());
        self.fetcher
            .get_or_fetch_as(&key::driver_qualifying(driver_id), || async move {
                f1.driver_qualifying(driver_id, &season).await
            })
            .await
    }

    pub async fn meetings(&self, year: i32) -> Result<Served<Vec<Meeting>>> {
        let live = self.upstreams.live.clone();
        self.fetcher
            .get_or_fetch_as(key::MEETINGS, || async move { live.meetings(year).await })
            .await
    }

    /// Season dossier for a driver.
    ///
    /// The configured focus driver is always admitted. Other drivers must
    /// appear in the current standings, which keeps the set of per-driver
    /// cache keys bounded. Missing results make the dossier unavailable;
    /// missing qualifying or standings only leave those parts empty.
    pub async fn driver_dossier(&self, driver_id: &str) -> Result<DriverDossier> {
        let (standings, results, qualifying) = if driver_id == &*self.focus_driver {
            futures::join!(
                self.driver_standings(),
                self.driver_results(driver_id),
                self.driver_qualifying(driver_id),
            )
        } else {
            let standings = self.driver_standings().await?;
            if !standings.data.contains(driver_id) {
                return Err(ApiError::NotFound(format!("driver {}", driver_id)).into());
            }
            let (results, qualifying) = futures::join!(
                self.driver_results(driver_id),
                self.driver_qualifying(driver_id),
            );
            (Ok(standings), results, qualifying)
        };

        let results = results?.data;
        let qualifying = qualifying.map(|q| q.data).unwrap_or_default();
        let standings = standings.ok().map(|s| s.data);

        Ok(compute_driver_dossier(
            &results,
            &qualifying,
            standings.as_ref(),
            driver_id,
        ))
    }

    /// Forecast for the configured number of leading drivers
    pub async fn scenario_forecast(&self, top_n: usize) -> Result<ScenarioForecast> {
        let (standings, schedule) = futures::join!(self.driver_standings(), self.schedule());
        let (standings, schedule) = (standings?.data, schedule?.data);

        Ok(compute_scenario_forecast(
            &standings,
            &schedule,
            self.now(),
            top_n,
        ))
    }
}
