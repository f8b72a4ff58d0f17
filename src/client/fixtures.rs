//! Test fixtures and builders for upstream model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};

use super::models::{
    Circuit, Constructor, ConstructorStanding, ConstructorStandingsList, Driver, DriverStanding,
    DriverStandingsList, QualifyingResult, Race, RaceResult, SessionTime,
};

// ============================================================================
// RaceBuilder
// ============================================================================

/// Builder for creating test Race instances.
///
/// # Example
/// ```ignore
/// let race = RaceBuilder::new(3)
///     .name("Australian Grand Prix")
///     .starts_at(start)
///     .result(ResultBuilder::new("alonso").position(6).build())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct RaceBuilder {
    round: u32,
    name: String,
    circuit_id: String,
    starts_at: Option<DateTime<Utc>>,
    sprint: bool,
    results: Vec<RaceResult>,
    qualifying: Vec<QualifyingResult>,
}

impl RaceBuilder {
    /// Create a new builder for the given round.
    pub fn new(round: u32) -> Self {
        Self {
            round,
            name: format!("Round {} Grand Prix", round),
            circuit_id: format!("circuit_{}", round),
            starts_at: None,
            sprint: false,
            results: Vec::new(),
            qualifying: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn circuit(mut self, circuit_id: impl Into<String>) -> Self {
        self.circuit_id = circuit_id.into();
        self
    }

    /// Set the race start; date and time are split the way upstream sends them.
    pub fn starts_at(mut self, start: DateTime<Utc>) -> Self {
        self.starts_at = Some(start);
        self
    }

    /// Mark the weekend as a sprint weekend.
    pub fn sprint(mut self) -> Self {
        self.sprint = true;
        self
    }

    pub fn result(mut self, result: RaceResult) -> Self {
        self.results.push(result);
        self
    }

    pub fn qualifying(mut self, result: QualifyingResult) -> Self {
        self.qualifying.push(result);
        self
    }

    /// Build the Race.
    pub fn build(self) -> Race {
        let (date, time) = match self.starts_at {
            Some(start) => (
                Some(start.format("%Y-%m-%d").to_string()),
                Some(start.format("%H:%M:%SZ").to_string()),
            ),
            None => (None, None),
        };

        Race {
            season: Some("2024".to_string()),
            round: Some(self.round.to_string()),
            race_name: Some(self.name),
            circuit: Some(Circuit {
                circuit_id: Some(self.circuit_id),
                ..Default::default()
            }),
            date,
            time,
            sprint: self.sprint.then(SessionTime::default),
            results: self.results,
            qualifying_results: self.qualifying,
            ..Default::default()
        }
    }
}

// ============================================================================
// ResultBuilder
// ============================================================================

/// Builder for creating test RaceResult instances.
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    driver_id: String,
    position: Option<String>,
    points: Option<String>,
    status: Option<String>,
    constructor_id: Option<String>,
}

impl ResultBuilder {
    /// Create a new builder for a finisher in P10 with one point.
    pub fn new(driver_id: impl Into<String>) -> Self {
        Self {
            driver_id: driver_id.into(),
            position: Some("10".to_string()),
            points: Some("1".to_string()),
            status: Some("Finished".to_string()),
            constructor_id: None,
        }
    }

    pub fn position(mut self, position: u32) -> Self {
        self.position = Some(position.to_string());
        self
    }

    /// Set the raw position string, including unparseable values.
    pub fn raw_position(mut self, position: Option<&str>) -> Self {
        self.position = position.map(String::from);
        self
    }

    pub fn points(mut self, points: f64) -> Self {
        self.points = Some(points.to_string());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn no_status(mut self) -> Self {
        self.status = None;
        self
    }

    pub fn team(mut self, constructor_id: impl Into<String>) -> Self {
        self.constructor_id = Some(constructor_id.into());
        self
    }

    /// Build the RaceResult.
    pub fn build(self) -> RaceResult {
        RaceResult {
            position: self.position,
            points: self.points,
            status: self.status,
            driver: Some(driver(&self.driver_id)),
            constructor: self.constructor_id.map(constructor),
            ..Default::default()
        }
    }
}

// ============================================================================
// QualifyingBuilder
// ============================================================================

/// Builder for creating test QualifyingResult instances.
#[derive(Debug, Clone)]
pub struct QualifyingBuilder {
    driver_id: String,
    position: u32,
    q1: Option<String>,
    q2: Option<String>,
    q3: Option<String>,
}

impl QualifyingBuilder {
    pub fn new(driver_id: impl Into<String>, position: u32) -> Self {
        Self {
            driver_id: driver_id.into(),
            position,
            q1: Some("1:30.000".to_string()),
            q2: None,
            q3: None,
        }
    }

    pub fn q2(mut self, time: impl Into<String>) -> Self {
        self.q2 = Some(time.into());
        self
    }

    pub fn q3(mut self, time: impl Into<String>) -> Self {
        self.q3 = Some(time.into());
        self
    }

    pub fn build(self) -> QualifyingResult {
        QualifyingResult {
            position: Some(self.position.to_string()),
            driver: Some(driver(&self.driver_id)),
            q1: self.q1,
            q2: self.q2,
            q3: self.q3,
            ..Default::default()
        }
    }
}

// ============================================================================
// Standings helpers
// ============================================================================

/// Driver with a name derived from the ID ("alonso" -> "Test Alonso").
pub fn driver(driver_id: &str) -> Driver {
    let mut chars = driver_id.chars();
    let family = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    Driver {
        driver_id: Some(driver_id.to_string()),
        code: Some(driver_id.chars().take(3).collect::<String>().to_uppercase()),
        given_name: Some("Test".to_string()),
        family_name: Some(family),
        ..Default::default()
    }
}

pub fn constructor(constructor_id: impl Into<String>) -> Constructor {
    let id = constructor_id.into();
    Constructor {
        name: Some(format!("Team {}", id)),
        constructor_id: Some(id),
        ..Default::default()
    }
}

/// Standing entry with the given points and team; position is set by
/// [`standings_list`].
pub fn standing(driver_id: &str, points: f64, team: &str) -> DriverStanding {
    DriverStanding {
        points: Some(points.to_string()),
        wins: Some("0".to_string()),
        driver: Some(driver(driver_id)),
        constructors: vec![constructor(team)],
        ..Default::default()
    }
}

/// Championship table, positions assigned in the given order.
pub fn standings_list(entries: Vec<DriverStanding>) -> DriverStandingsList {
    DriverStandingsList {
        season: Some("2024".to_string()),
        round: Some("10".to_string()),
        driver_standings: entries
            .into_iter()
            .enumerate()
            .map(|(i, mut s)| {
                s.position = Some((i + 1).to_string());
                s
            })
            .collect(),
    }
}

pub fn constructor_standings_list(teams: &[(&str, f64)]) -> ConstructorStandingsList {
    ConstructorStandingsList {
        season: Some("2024".to_string()),
        round: Some("10".to_string()),
        constructor_standings: teams
            .iter()
            .enumerate()
            .map(|(i, (id, points))| ConstructorStanding {
                position: Some((i + 1).to_string()),
                points: Some(points.to_string()),
                constructor: Some(constructor(*id)),
                ..Default::default()
            })
            .collect(),
    }
}

/// `rounds` weekly races, the first starting at `first_start`.
pub fn season_schedule(rounds: u32, first_start: DateTime<Utc>) -> Vec<Race> {
    (1..=rounds)
        .map(|round| {
            RaceBuilder::new(round)
                .starts_at(first_start + Duration::weeks(i64::from(round) - 1))
                .build()
        })
        .collect()
}

// ============================================================================
// Upstream servers
// ============================================================================

/// Start a listener that accepts connections and never answers.
///
/// Returns its base URL. Requests against it end in the client timeout.
pub async fn silent_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}
