//! Scenario forecast display models

use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::{NONE, format_points, format_position};
use crate::stats::{StandingEntry, scenario::WinScenario};

/// One row of the current championship table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StandingDisplay {
    #[tabled(rename = "POS")]
    pub position: String,

    #[tabled(rename = "DRIVER")]
    pub name: String,

    #[tabled(rename = "TEAM")]
    pub team: String,

    #[tabled(rename = "PTS")]
    pub points: String,
}

impl From<&StandingEntry> for StandingDisplay {
    fn from(entry: &StandingEntry) -> Self {
        Self {
            position: format_position(entry.position),
            name: entry.name.clone(),
            team: entry.team.clone(),
            points: format_points(entry.points),
        }
    }
}

/// Outcome of one driver winning the next race.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ScenarioDisplay {
    #[tabled(rename = "IF THIS DRIVER WINS")]
    pub name: String,

    #[tabled(rename = "NOW")]
    pub previous: String,

    #[tabled(rename = "AFTER")]
    pub after: String,

    #[tabled(rename = "PTS")]
    pub points: String,

    #[tabled(rename = "LEADER")]
    pub leader: String,

    #[tabled(rename = "GAP")]
    pub gap: String,
}

impl From<&WinScenario> for ScenarioDisplay {
    fn from(s: &WinScenario) -> Self {
        let points = s
            .new_order
            .iter()
            .find(|e| e.entry.driver_id == s.driver_id)
            .map(|e| format_points(e.entry.points))
            .unwrap_or_else(|| NONE.to_string());

        let leader = s
            .new_order
            .first()
            .map(|e| e.entry.name.clone())
            .unwrap_or_else(|| s.leader.clone());

        Self {
            name: s.name.clone(),
            previous: format_position(s.previous_position),
            after: format_position(s.new_position),
            points,
            leader,
            gap: s
                .lead_gap
                .map(format_points)
                .unwrap_or_else(|| NONE.to_string()),
        }
    }
}
