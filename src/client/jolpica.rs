//! Jolpica (Ergast-compatible) API client

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::F1DataApi;
use super::models::{ConstructorStandingsList, DriverStandingsList, Race};
use crate::error::{ApiError, Result};

/// Jolpica API base URL
pub const JOLPICA_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Jolpica allows a burst of 4 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 4;

const RACES: &str = "/RaceTable/Races";
const FIRST_RACE: &str = "/RaceTable/Races/0";
const FIRST_STANDINGS_LIST: &str = "/StandingsTable/StandingsLists/0";

/// Jolpica API client
pub struct JolpicaClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl JolpicaClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Fetch `path` and deserialize the node at `pointer` inside `MRData`.
    ///
    /// A missing or null node is [`ApiError::NoData`]: upstream answered but
    /// had nothing for this query.
    async fn fetch_at<T: DeserializeOwned>(&self, path: &str, pointer: &str) -> Result<T> {
        let data = self.fetch_mrdata(path).await?;

        let node = data
            .pointer(pointer)
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| ApiError::NoData(format!("{} missing from {}", pointer, path)))?;

        serde_json::from_value(node).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected shape at {}: {}", pointer, e)).into()
        })
    }

    /// Fetch `path` and unwrap the `MRData` envelope when present
    async fn fetch_mrdata(&self, path: &str) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self.http.get(&url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let mut body = response.json::<Value>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(match body.get_mut("MRData") {
                    Some(inner) => inner.take(),
                    None => body,
                })
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl F1DataApi for JolpicaClient {
    async fn schedule(&self, season: &str) -> Result<Vec<Race>> {
        self.fetch_at(&format!("/{}.json?limit=30", season), RACES).await
    }

    async fn driver_standings(&self, season: &str) -> Result<DriverStandingsList> {
        self.fetch_at(
            &format!("/{}/driverstandings.json", season),
            FIRST_STANDINGS_LIST,
        )
        .await
    }

    async fn constructor_standings(&self, season: &str) -> Result<ConstructorStandingsList> {
        self.fetch_at(
            &format!("/{}/constructorstandings.json", season),
            FIRST_STANDINGS_LIST,
        )
        .await
    }

    async fn latest_results(&self) -> Result<Race> {
        self.fetch_at("/current/last/results.json", FIRST_RACE).await
    }

    async fn driver_results(&self, driver_id: &str, season: &str) -> Result<Vec<Race>> {
        self.fetch_at(
            &format!("/{}/drivers/{}/results.json?limit=50", season, driver_id),
            RACES,
        )
        .await
    }

    async fn driver_qualifying(&self, driver_id: &str, season: &str) -> Result<Vec<Race>> {
        self.fetch_at(
            &format!("/{}/drivers/{}/qualifying.json?limit=50", season, driver_id),
            RACES,
        )
        .await
    }
}
