//! OpenF1 live-timing client

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::LiveTimingApi;
use super::models::{Meeting, Race, Session, WeatherReading};
use crate::error::{ApiError, Result};

/// OpenF1 API base URL
pub const OPENF1_BASE_URL: &str = "https://api.openf1.org/v1";

/// OpenF1 API client
pub struct OpenF1Client {
    http: HttpClient,
    base_url: String,
}

impl OpenF1Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self.http.get(&url).send().await.map_err(ApiError::from)?;

        match response.status() {
            StatusCode::OK => response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
            }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(ApiError::RateLimit(Duration::from_secs(60)).into())
            }
            status if status.is_server_error() => {
                Err(ApiError::ServerError(format!("Server error: {}", status)).into())
            }
            status => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code: {}",
                status
            ))
            .into()),
        }
    }
}

#[async_trait]
impl LiveTimingApi for OpenF1Client {
    async fn meetings(&self, year: i32) -> Result<Vec<Meeting>> {
        self.get(&format!("/meetings?year={}", year)).await
    }

    async fn weather(&self, meeting_key: i64) -> Result<WeatherReading> {
        let sessions: Vec<Session> = self
            .get(&format!("/sessions?meeting_key={}", meeting_key))
            .await?;

        let session_key = sessions
            .last()
            .and_then(|s| s.session_key)
            .ok_or_else(|| ApiError::NoData(format!("no sessions for meeting {}", meeting_key)))?;

        let readings: Vec<WeatherReading> = self
            .get(&format!(
                "/weather?session_key={}&order=date&order_direction=desc",
                session_key
            ))
            .await?;

        latest_reading(readings)
            .ok_or_else(|| ApiError::NoData(format!("no weather for session {}", session_key)).into())
    }
}

/// Most recent reading by sample time. ISO 8601 strings order lexically.
fn latest_reading(readings: Vec<WeatherReading>) -> Option<WeatherReading> {
    readings
        .into_iter()
        .max_by(|a, b| a.date.cmp(&b.date))
}

/// Find the OpenF1 meeting for a scheduled race.
///
/// Matches when the meeting's short circuit name contains the race's circuit
/// ID, or the meeting name contains the race name without "Grand Prix".
/// Comparison is case-insensitive and empty needles never match.
pub fn find_meeting<'a>(meetings: &'a [Meeting], race: &Race) -> Option<&'a Meeting> {
    let circuit_id = race
        .circuit
        .as_ref()
        .and_then(|c| c.circuit_id.as_deref())
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    let race_stem = race
        .race_name
        .as_deref()
        .map(|name| name.replace(" Grand Prix", "").trim().to_lowercase())
        .filter(|s| !s.is_empty());

    meetings.iter().find(|m| {
        let by_circuit = match (&circuit_id, &m.circuit_short_name) {
            (Some(id), Some(short)) => short.to_lowercase().contains(id.as_str()),
            _ => false,
        };
        let by_name = match (&race_stem, &m.meeting_name) {
            (Some(stem), Some(name)) => name.to_lowercase().contains(stem.as_str()),
            _ => false,
        };
        by_circuit || by_name
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Circuit;
    use crate::error::Error;
    use mockito::Matcher;

    fn meeting(key: i64, name: &str, short: &str) -> Meeting {
        Meeting {
            meeting_key: Some(key),
            meeting_name: Some(name.to_string()),
            circuit_short_name: Some(short.to_string()),
            ..Default::default()
        }
    }

    fn race(name: &str, circuit_id: &str) -> Race {
        Race {
            race_name: Some(name.to_string()),
            circuit: Some(Circuit {
                circuit_id: Some(circuit_id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_meeting_by_circuit() {
        let meetings = vec![
            meeting(1, "Bahrain Grand Prix", "Sakhir"),
            meeting(2, "Grand Prix de Monaco", "Monte Carlo"),
        ];
        let found = find_meeting(&meetings, &race("Monaco GP", "monte carlo"));
        assert_eq!(found.and_then(|m| m.meeting_key), Some(2));
    }

    #[test]
    fn test_find_meeting_by_name() {
        let meetings = vec![
            meeting(1, "Bahrain Grand Prix", "Sakhir"),
            meeting(2, "Japanese Grand Prix", "Suzuka"),
        ];
        let found = find_meeting(&meetings, &race("Japanese Grand Prix", "suzuka_circuit"));
        assert_eq!(found.and_then(|m| m.meeting_key), Some(2));
    }

    #[test]
    fn test_find_meeting_none() {
        let meetings = vec![meeting(1, "Bahrain Grand Prix", "Sakhir")];
        assert!(find_meeting(&meetings, &race("Japanese Grand Prix", "suzuka")).is_none());
        assert!(find_meeting(&meetings, &Race::default()).is_none());
    }

    #[test]
    fn test_latest_reading_by_date() {
        let readings = vec![
            WeatherReading {
                date: Some("2024-03-02T14:00:00+00:00".into()),
                air_temperature: Some(20.0),
                ..Default::default()
            },
            WeatherReading {
                date: Some("2024-03-02T15:00:00+00:00".into()),
                air_temperature: Some(22.5),
                ..Default::default()
            },
        ];
        assert_eq!(latest_reading(readings).unwrap().air_temperature, Some(22.5));
        assert!(latest_reading(Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_weather_uses_last_session() {
        let mut server = mockito::Server::new_async().await;
        let _sessions = server
            .mock("GET", "/sessions")
            .match_query(Matcher::UrlEncoded("meeting_key".into(), "1229".into()))
            .with_status(200)
            .with_body(r#"[{"session_key": 9472, "session_name": "Practice 1"}, {"session_key": 9480, "session_name": "Race"}]"#)
            .create_async()
            .await;
        let _weather = server
            .mock("GET", "/weather")
            .match_query(Matcher::UrlEncoded("session_key".into(), "9480".into()))
            .with_status(200)
            .with_body(r#"[{"date": "2024-03-02T15:10:00+00:00", "air_temperature": 18.4, "rainfall": 0}]"#)
            .create_async()
            .await;

        let client = OpenF1Client::new(server.url(), Duration::from_secs(5)).unwrap();
        let reading = client.weather(1229).await.unwrap();

        assert_eq!(reading.air_temperature, Some(18.4));
        assert_eq!(reading.rainfall, Some(0.0));
    }

    #[tokio::test]
    async fn test_weather_without_sessions_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        let _sessions = server
            .mock("GET", "/sessions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = OpenF1Client::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = client.weather(1).await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NoData(_))));
    }

    #[tokio::test]
    async fn test_meetings() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/meetings")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .with_status(200)
            .with_body(r#"[{"meeting_key": 1229, "meeting_name": "Bahrain Grand Prix", "circuit_short_name": "Sakhir", "year": 2024}]"#)
            .create_async()
            .await;

        let client = OpenF1Client::new(server.url(), Duration::from_secs(5)).unwrap();
        let meetings = client.meetings(2024).await.unwrap();

        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].circuit_short_name.as_deref(), Some("Sakhir"));
    }
}
