pub mod prediction;
pub mod race;
pub mod scenario;

pub use prediction::{LaneReport, PredictionRecord, TicketSet, TripleProbability};
pub use race::{
    CourseStats, Exhibition, IntegratedRace, OpponentCourseStats, RaceEntry, RaceMeta, RaceWeather,
};
pub use scenario::Scenario;
