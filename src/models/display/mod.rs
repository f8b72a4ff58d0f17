//! Display model implementations for table and JSON output
//!
//! Display models flatten domain types into string columns with
//! appropriate headers.

mod dossier;
mod refresh;
mod scenario;

pub use dossier::{QualifyingDisplay, RaceRowDisplay};
pub use refresh::RefreshOutcomeDisplay;
pub use scenario::{ScenarioDisplay, StandingDisplay};
