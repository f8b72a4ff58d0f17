//! The fixed set of keys kept warm by the scheduler

use super::RefreshTask;
use crate::cache::{CacheTtl, key};
use crate::client::Upstreams;

/// Build the refresh plan: season-wide data plus the focus driver's
/// results and qualifying.
pub fn refresh_plan(
    upstreams: &Upstreams,
    season: &str,
    focus_driver: &str,
    ttl: &CacheTtl,
) -> Vec<RefreshTask> {
    let season = season.to_string();
    let driver = focus_driver.to_string();

    let schedule = {
        let f1 = upstreams.f1.clone();
        let season = season.clone();
        RefreshTask::typed(key::SCHEDULE, ttl.schedule, move || {
            let (f1, season) = (f1.clone(), season.clone());
            async move { f1.schedule(&season).await }
        })
    };

    let driver_standings = {
        let f1 = upstreams.f1.clone();
        let season = season.clone();
        RefreshTask::typed(key::DRIVER_STANDINGS, ttl.standings, move || {
            let (f1, season) = (f1.clone(), season.clone());
            async move { f1.driver_standings(&season).await }
        })
    };

    let constructor_standings = {
        let f1 = upstreams.f1.clone();
        let season = season.clone();
        RefreshTask::typed(key::CONSTRUCTOR_STANDINGS, ttl.standings, move || {
            let (f1, season) = (f1.clone(), season.clone());
            async move { f1.constructor_standings(&season).await }
        })
    };

    let last_results = {
        let f1 = upstreams.f1.clone();
        RefreshTask::typed(key::LAST_RACE_RESULTS, ttl.results, move || {
            let f1 = f1.clone();
            async move { f1.latest_results().await }
        })
    };

    let news = {
        let news = upstreams.news.clone();
        RefreshTask::typed(key::NEWS, ttl.news, move || {
            let news = news.clone();
            async move { news.news().await }
        })
    };

    let driver_results = {
        let f1 = upstreams.f1.clone();
        let (season, driver) = (season.clone(), driver.clone());
        RefreshTask::typed(key::driver_results(&driver), ttl.driver, move || {
            let (f1, season, driver) = (f1.clone(), season.clone(), driver.clone());
            async move { f1.driver_results(&driver, &season).await }
        })
    };

    let driver_qualifying = {
        let f1 = upstreams.f1.clone();
        RefreshTask::typed(key::driver_qualifying(&driver), ttl.driver, move || {
            let (f1, season, driver) = (f1.clone(), season.clone(), driver.clone());
            async move { f1.driver_qualifying(&driver, &season).await }
        })
    };

    vec![
        schedule,
        driver_standings,
        constructor_standings,
        last_results,
        news,
        driver_results,
        driver_qualifying,
    ]
}
