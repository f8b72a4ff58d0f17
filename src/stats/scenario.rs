//! Championship scenario forecast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_leading_int, parse_points};
use crate::client::models::{DriverStandingsList, Race};

/// Points for P1..P10 in a grand prix
pub const RACE_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points for P1..P8 in a sprint
pub const SPRINT_POINTS: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

pub const FASTEST_LAP_BONUS: u32 = 1;

/// Win plus fastest lap. Sprint points are not counted.
pub const MAX_POINTS_PER_RACE: u32 = 26;

/// Drivers included in a forecast unless configured otherwise
pub const DEFAULT_TOP_N: usize = 5;

/// A driver's place in the championship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub driver_id: String,
    pub name: String,
    pub team: String,
    pub points: f64,
    pub position: u32,
}

/// Standing after a simulated result, with the position before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedEntry {
    #[serde(flatten)]
    pub entry: StandingEntry,
    pub prev_position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRace {
    pub name: Option<String>,
    pub round: Option<String>,
    pub date: Option<String>,
    pub is_sprint: bool,
}

/// "If this driver wins the next race"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinScenario {
    pub driver_id: String,
    pub name: String,
    pub new_order: Vec<SimulatedEntry>,
    pub previous_position: u32,
    pub new_position: u32,
    pub takes_lead: bool,
    /// Driver ID of the leader afterwards
    pub leader: String,
    /// Leader's points minus the runner-up's; absent with a single driver
    pub lead_gap: Option<f64>,
}

impl WinScenario {
    /// Places gained (negative never happens for a win, zero for the leader)
    #[allow(dead_code)]
    pub fn positions_gained(&self) -> i64 {
        i64::from(self.previous_position) - i64::from(self.new_position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioForecast {
    pub current_standings: Vec<StandingEntry>,
    pub next_race: Option<NextRace>,
    pub remaining_races: usize,
    pub max_points_remaining: u32,
    pub race_points: Vec<u32>,
    pub sprint_points: Vec<u32>,
    pub fastest_lap_bonus: u32,
    pub scenarios: Vec<WinScenario>,
}

/// Add `awards` (driver ID, points) to a copy of `standings`, re-sort by
/// points descending and renumber positions. Ties keep their prior order.
pub fn apply_points(standings: &[StandingEntry], awards: &[(&str, f64)]) -> Vec<SimulatedEntry> {
    let mut next: Vec<SimulatedEntry> = standings
        .iter()
        .map(|entry| SimulatedEntry {
            prev_position: entry.position,
            entry: entry.clone(),
        })
        .collect();

    for (driver_id, points) in awards {
        if let Some(e) = next.iter_mut().find(|e| e.entry.driver_id == *driver_id) {
            e.entry.points += points;
        }
    }

    next.sort_by(|a, b| b.entry.points.total_cmp(&a.entry.points));
    for (i, e) in next.iter_mut().enumerate() {
        e.entry.position = i as u32 + 1;
    }

    next
}

/// Simulate `driver_id` winning the next race.
pub fn simulate_win(standings: &[StandingEntry], driver_id: &str) -> Option<WinScenario> {
    let before = standings.iter().find(|e| e.driver_id == driver_id)?;
    let new_order = apply_points(standings, &[(driver_id, f64::from(RACE_POINTS[0]))]);

    let after = new_order.iter().find(|e| e.entry.driver_id == driver_id)?;
    let leader = new_order.first()?;
    let lead_gap = new_order
        .get(1)
        .map(|second| leader.entry.points - second.entry.points);

    Some(WinScenario {
        driver_id: driver_id.to_string(),
        name: before.name.clone(),
        previous_position: after.prev_position,
        new_position: after.entry.position,
        takes_lead: after.entry.position == 1,
        leader: leader.entry.driver_id.clone(),
        lead_gap,
        new_order,
    })
}

/// Leading `top_n` entries of the championship table.
///
/// Entries without a driver are skipped. An unparseable position falls back
/// to the entry's rank in the table.
pub fn top_standings(standings: &DriverStandingsList, top_n: usize) -> Vec<StandingEntry> {
    standings
        .driver_standings
        .iter()
        .filter_map(|s| {
            let driver = s.driver.as_ref()?;
            Some((s, driver))
        })
        .take(top_n)
        .enumerate()
        .map(|(i, (s, driver))| {
            let position = match parse_leading_int(s.position.as_deref()) {
                0 => i as u32 + 1,
                p => p,
            };
            StandingEntry {
                driver_id: driver.driver_id.clone().unwrap_or_default(),
                name: driver.full_name(),
                team: s
                    .team()
                    .and_then(|t| t.name.clone())
                    .unwrap_or_default(),
                points: parse_points(s.points.as_deref()),
                position,
            }
        })
        .collect()
}

/// First race starting strictly after `now`
pub fn next_race(schedule: &[Race], now: DateTime<Utc>) -> Option<&Race> {
    schedule.iter().find(|r| r.is_after(now))
}

/// Build the forecast from the current table and the season schedule.
pub fn compute_scenario_forecast(
    standings: &DriverStandingsList,
    schedule: &[Race],
    now: DateTime<Utc>,
    top_n: usize,
) -> ScenarioForecast {
    let current_standings = top_standings(standings, top_n);
    let remaining_races = schedule.iter().filter(|r| r.is_after(now)).count();

    let next_race = next_race(schedule, now).map(|race| NextRace {
        name: race.race_name.clone(),
        round: race.round.clone(),
        date: race.date.clone(),
        is_sprint: race.is_sprint_weekend(),
    });

    let scenarios = current_standings
        .iter()
        .filter_map(|e| simulate_win(&current_standings, &e.driver_id))
        .collect();

    ScenarioForecast {
        remaining_races,
        max_points_remaining: remaining_races as u32 * MAX_POINTS_PER_RACE,
        next_race,
        race_points: RACE_POINTS.to_vec(),
        sprint_points: SPRINT_POINTS.to_vec(),
        fastest_lap_bonus: FASTEST_LAP_BONUS,
        current_standings,
        scenarios,
    }
}
