//! Display models for CLI output
//!
//! Converts refresh reports and computed statistics into table rows.

pub mod display;

pub use display::{
    QualifyingDisplay, RaceRowDisplay, RefreshOutcomeDisplay, ScenarioDisplay, StandingDisplay,
};
