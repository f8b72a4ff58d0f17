//! Per-driver season dossier

use serde::{Deserialize, Serialize};

use super::{parse_leading_int, parse_points, round1};
use crate::client::models::{Constructor, Driver, DriverStanding, DriverStandingsList, Race};

/// Whether the trailing run of races scored points or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakKind {
    Points,
    NoPoints,
}

/// Run of consecutive races at the end of the season so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: StreakKind,
}

impl Streak {
    /// Trailing streak over per-race points, oldest first.
    ///
    /// If the latest race scored, counts trailing scoring races; otherwise
    /// counts trailing zero-point races.
    pub fn trailing(points: &[f64]) -> Self {
        let scoring = points.iter().rev().take_while(|p| **p > 0.0).count();
        if scoring > 0 {
            return Self {
                count: scoring,
                kind: StreakKind::Points,
            };
        }

        Self {
            count: points.iter().rev().take_while(|p| **p == 0.0).count(),
            kind: StreakKind::NoPoints,
        }
    }
}

/// One race from the driver's season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRow {
    pub round: Option<String>,
    pub race_name: Option<String>,
    /// Classified position, 0 when unparseable
    pub position: u32,
    pub points: f64,
    pub grid: u32,
    pub status: Option<String>,
    /// Race time for finishers, otherwise the status
    pub time: Option<String>,
}

/// One qualifying session from the driver's season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingRow {
    pub round: Option<String>,
    pub race_name: Option<String>,
    pub quali_position: u32,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierStats {
    pub best_finish: Option<u32>,
    /// Mean position including DNF zeros
    pub avg_finish: Option<f64>,
    pub dnfs: usize,
    pub points_per_race: Option<f64>,
    pub total_races: usize,
    pub streak: Streak,
}

/// Head-to-head against the driver sharing the same current team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeammateComparison {
    pub driver: Driver,
    pub position: Option<String>,
    pub points: Option<String>,
    /// Dossier driver's points minus the teammate's
    pub points_delta: f64,
}

/// Aggregated season statistics for one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDossier {
    pub driver: Driver,
    pub team: Option<Constructor>,
    pub position: Option<String>,
    pub points: String,
    pub wins: String,
    pub races: Vec<RaceRow>,
    pub quali_data: Vec<QualifyingRow>,
    pub stats: DossierStats,
    pub teammate: Option<TeammateComparison>,
}

/// "Finished" and lapped finishers ("+1 Lap") are classified; anything else,
/// including a missing status, is a DNF.
fn is_dnf(status: Option<&str>) -> bool {
    !status.is_some_and(|s| s == "Finished" || s.starts_with('+'))
}

fn race_rows(results: &[Race]) -> Vec<RaceRow> {
    results
        .iter()
        .filter_map(|race| {
            let result = race.results.first()?;
            Some(RaceRow {
                round: race.round.clone(),
                race_name: race.race_name.clone(),
                position: parse_leading_int(result.position.as_deref()),
                points: parse_points(result.points.as_deref()),
                grid: parse_leading_int(result.grid.as_deref()),
                status: result.status.clone(),
                time: result
                    .time
                    .as_ref()
                    .and_then(|t| t.time.clone())
                    .or_else(|| result.status.clone()),
            })
        })
        .collect()
}

fn qualifying_rows(qualifying: &[Race]) -> Vec<QualifyingRow> {
    qualifying
        .iter()
        .map(|race| {
            let q = race.qualifying_results.first();
            QualifyingRow {
                round: race.round.clone(),
                race_name: race.race_name.clone(),
                quali_position: parse_leading_int(q.and_then(|q| q.position.as_deref())),
                q1: q.and_then(|q| q.q1.clone()),
                q2: q.and_then(|q| q.q2.clone()),
                q3: q.and_then(|q| q.q3.clone()),
            }
        })
        .collect()
}

fn find_teammate<'a>(
    standings: &'a DriverStandingsList,
    own: &DriverStanding,
    driver_id: &str,
) -> Option<&'a DriverStanding> {
    let team = own.team_id()?;
    standings
        .driver_standings
        .iter()
        .find(|s| s.driver_id() != Some(driver_id) && s.team_id() == Some(team))
}

/// Build the dossier for `driver_id`.
///
/// `results` and `qualifying` are season race lists filtered to this driver
/// (one result per race). `standings` is the current championship table, if
/// known.
pub fn compute_driver_dossier(
    results: &[Race],
    qualifying: &[Race],
    standings: Option<&DriverStandingsList>,
    driver_id: &str,
) -> DriverDossier {
    let races = race_rows(results);
    let quali_data = qualifying_rows(qualifying);

    let positions: Vec<u32> = races.iter().map(|r| r.position).collect();
    let points: Vec<f64> = races.iter().map(|r| r.points).collect();
    let total_points: f64 = points.iter().sum();
    let total_races = races.len();

    let best_finish = positions.iter().copied().filter(|p| *p > 0).min();
    let dnfs = races.iter().filter(|r| is_dnf(r.status.as_deref())).count();
    let (avg_finish, points_per_race) = if total_races > 0 {
        let n = total_races as f64;
        (
            Some(round1(positions.iter().map(|p| f64::from(*p)).sum::<f64>() / n)),
            Some(round1(total_points / n)),
        )
    } else {
        (None, None)
    };

    let own = standings.and_then(|list| list.find(driver_id));

    let driver = own
        .and_then(|s| s.driver.clone())
        .or_else(|| {
            results
                .iter()
                .flat_map(|race| race.results.first())
                .find_map(|r| r.driver.clone())
        })
        .unwrap_or_else(|| Driver::with_id(driver_id));

    let team = own.and_then(|s| s.team().cloned()).or_else(|| {
        results
            .iter()
            .rev()
            .flat_map(|race| race.results.first())
            .find_map(|r| r.constructor.clone())
    });

    let own_points = own
        .and_then(|s| s.points.clone())
        .unwrap_or_else(|| total_points.to_string());

    let teammate = match (standings, own) {
        (Some(list), Some(own)) => find_teammate(list, own, driver_id).map(|mate| {
            TeammateComparison {
                driver: mate
                    .driver
                    .clone()
                    .unwrap_or_else(|| Driver::with_id(String::new())),
                position: mate.position.clone(),
                points: mate.points.clone(),
                points_delta: parse_points(Some(&own_points))
                    - parse_points(mate.points.as_deref()),
            }
        }),
        _ => None,
    };

    DriverDossier {
        driver,
        team,
        position: own.and_then(|s| s.position.clone()),
        points: own_points,
        wins: own
            .and_then(|s| s.wins.clone())
            .unwrap_or_else(|| "0".to_string()),
        stats: DossierStats {
            best_finish,
            avg_finish,
            dnfs,
            points_per_race,
            total_races,
            streak: Streak::trailing(&points),
        },
        races,
        quali_data,
        teammate,
    }
}
