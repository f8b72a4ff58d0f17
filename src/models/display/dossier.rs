//! Driver dossier display models

use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::{format_points, format_position, or_dash};
use crate::stats::dossier::{QualifyingRow, RaceRow};

/// One race of a driver's season.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RaceRowDisplay {
    #[tabled(rename = "RND")]
    pub round: String,

    #[tabled(rename = "RACE")]
    pub race: String,

    #[tabled(rename = "GRID")]
    pub grid: String,

    #[tabled(rename = "FINISH")]
    pub finish: String,

    #[tabled(rename = "PTS")]
    pub points: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&RaceRow> for RaceRowDisplay {
    fn from(row: &RaceRow) -> Self {
        Self {
            round: or_dash(row.round.as_deref()),
            race: or_dash(row.race_name.as_deref()),
            grid: format_position(row.grid),
            finish: format_position(row.position),
            points: format_points(row.points),
            status: or_dash(row.status.as_deref()),
        }
    }
}

/// One qualifying session of a driver's season.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct QualifyingDisplay {
    #[tabled(rename = "RND")]
    pub round: String,

    #[tabled(rename = "RACE")]
    pub race: String,

    #[tabled(rename = "POS")]
    pub position: String,

    #[tabled(rename = "Q1")]
    pub q1: String,

    #[tabled(rename = "Q2")]
    pub q2: String,

    #[tabled(rename = "Q3")]
    pub q3: String,
}

impl From<&QualifyingRow> for QualifyingDisplay {
    fn from(row: &QualifyingRow) -> Self {
        Self {
            round: or_dash(row.round.as_deref()),
            race: or_dash(row.race_name.as_deref()),
            position: format_position(row.quali_position),
            q1: or_dash(row.q1.as_deref()),
            q2: or_dash(row.q2.as_deref()),
            q3: or_dash(row.q3.as_deref()),
        }
    }
}
