//! Cache key names
//!
//! Keys are plain strings shared between the refresh plan and the request
//! adapter; both must agree on them for background refreshes to be visible.

pub const SCHEDULE: &str = "schedule";
pub const DRIVER_STANDINGS: &str = "driverStandings";
pub const CONSTRUCTOR_STANDINGS: &str = "constructorStandings";
pub const LAST_RACE_RESULTS: &str = "lastRaceResults";
pub const NEWS: &str = "news";
pub const MEETINGS: &str = "meetings";

const DRIVER_RESULTS_PREFIX: &str = "driverResults:";
const DRIVER_QUALIFYING_PREFIX: &str = "driverQualifying:";

/// Key for a driver's season race results
pub fn driver_results(driver_id: &str) -> String {
    format!("{}{}", DRIVER_RESULTS_PREFIX, driver_id)
}

/// Key for a driver's season qualifying results
pub fn driver_qualifying(driver_id: &str) -> String {
    format!("{}{}", DRIVER_QUALIFYING_PREFIX, driver_id)
}

/// Whether a key holds per-driver data
pub fn is_driver_key(key: &str) -> bool {
    key.starts_with(DRIVER_RESULTS_PREFIX) || key.starts_with(DRIVER_QUALIFYING_PREFIX)
}
