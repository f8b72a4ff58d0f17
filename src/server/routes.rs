//! `/api` route handlers

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Datelike;
use log::{debug, warn};
use serde::Serialize;
use serde_json::json;

use super::response::{data, served};
use super::state::AppState;
use crate::cache::CacheEntry;
use crate::client::models::{Race, WeatherReading};
use crate::client::openf1::find_meeting;
use crate::error::{ApiError, Error, Result};
use crate::stats::scenario::next_race as first_upcoming;

/// Create API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(schedule))
        .route("/next-race", get(next_race))
        .route("/standings/drivers", get(driver_standings))
        .route("/standings/constructors", get(constructor_standings))
        .route("/results/latest", get(latest_results))
        .route("/news", get(news))
        .route("/drivers/:driver_id", get(driver_dossier))
        .route("/scenarios", get(scenarios))
        .route("/health", get(health))
}

/// GET /api/schedule
async fn schedule(State(state): State<AppState>) -> Result<Response> {
    Ok(served(state.schedule().await?))
}

/// GET /api/standings/drivers
async fn driver_standings(State(state): State<AppState>) -> Result<Response> {
    Ok(served(state.driver_standings().await?))
}

/// GET /api/standings/constructors
async fn constructor_standings(State(state): State<AppState>) -> Result<Response> {
    Ok(served(state.constructor_standings().await?))
}

/// GET /api/results/latest
async fn latest_results(State(state): State<AppState>) -> Result<Response> {
    Ok(served(state.latest_results().await?))
}

/// GET /api/news
async fn news(State(state): State<AppState>) -> Result<Response> {
    Ok(served(state.news().await?))
}

/// GET /api/next-race
///
/// Weather is best-effort: any failure on the live-timing side yields
/// `weather: null` rather than an error.
async fn next_race(State(state): State<AppState>) -> Result<Response> {
    let schedule = state.schedule().await?;
    let now = state.now();

    let Some(race) = first_upcoming(&schedule.data, now) else {
        return Ok(Json(json!({ "data": null, "message": "Season complete" })).into_response());
    };

    let weather = race_weather(&state, race, now.year()).await;
    Ok(data(json!({ "race": race, "weather": weather })))
}

async fn race_weather(state: &AppState, race: &Race, year: i32) -> Option<WeatherReading> {
    let meetings = match state.meetings(year).await {
        Ok(m) => m.data,
        Err(e) => {
            warn!("Weather lookup skipped: {}", e);
            return None;
        }
    };

    let meeting_key = find_meeting(&meetings, race).and_then(|m| m.meeting_key)?;
    match state.upstreams.live.weather(meeting_key).await {
        Ok(reading) => Some(reading),
        Err(e) => {
            debug!("No weather for meeting {}: {}", meeting_key, e);
            None
        }
    }
}

/// GET /api/drivers/:driver_id
async fn driver_dossier(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Response> {
    Ok(data(state.driver_dossier(&driver_id).await?))
}

/// GET /api/scenarios
async fn scenarios(State(state): State<AppState>) -> Result<Response> {
    Ok(data(state.scenario_forecast(state.scenario_top_n).await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheKeyHealth {
    key: String,
    stale: bool,
    written_at: chrono::DateTime<chrono::Utc>,
    expires_at: chrono::DateTime<chrono::Utc>,
}

impl CacheKeyHealth {
    fn new(key: String, entry: CacheEntry, stale: bool) -> Self {
        Self {
            stale,
            written_at: entry.written_at,
            expires_at: entry.expires_at,
            key,
        }
    }
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cache = state.cache();
    let now = state.now();

    let entries: Vec<CacheKeyHealth> = cache
        .keys()
        .into_iter()
        .filter_map(|key| {
            let entry = cache.entry(&key)?;
            let stale = cache.is_stale(&key);
            Some(CacheKeyHealth::new(key, entry, stale))
        })
        .collect();

    Json(json!({
        "status": "ok",
        "time": now,
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": (now - state.started_at).num_seconds().max(0),
        "cacheKeys": cache.keys(),
        "cache": entries,
    }))
}

/// Fallback for unknown `/api` paths
pub async fn not_found() -> Error {
    ApiError::NotFound("route".to_string()).into()
}
