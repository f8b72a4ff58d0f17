//! Refresh outcome display model

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::{NONE, format_elapsed_ms};
use crate::refresh::{TaskOutcome, TaskStatus};

/// One cache key's result from a refresh cycle.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RefreshOutcomeDisplay {
    #[tabled(rename = "KEY")]
    pub key: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "TIME")]
    pub elapsed: String,

    /// Failure reason for keys that kept their previous value
    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl From<&TaskOutcome> for RefreshOutcomeDisplay {
    fn from(outcome: &TaskOutcome) -> Self {
        let (status, detail) = match &outcome.status {
            TaskStatus::Refreshed => ("refreshed".green().to_string(), NONE.to_string()),
            TaskStatus::KeptStale { reason } => {
                ("kept stale".yellow().to_string(), reason.clone())
            }
        };

        Self {
            key: outcome.key.clone(),
            status,
            elapsed: format_elapsed_ms(outcome.elapsed_ms),
            detail,
        }
    }
}
