//! Upstream data models
//!
//! Shapes follow the upstream JSON so cached values can be handed to the
//! frontend unchanged. Every field that upstream may omit is optional.

mod live;
mod news;
mod race;
mod standings;

pub use live::{Meeting, Session, WeatherReading};
pub use news::NewsArticle;
pub use race::{Circuit, QualifyingResult, Race, RaceResult, ResultTime, SessionTime};
pub use standings::{
    Constructor, ConstructorStanding, ConstructorStandingsList, Driver, DriverStanding,
    DriverStandingsList,
};
