//! # kyotei_core - Monte Carlo boat race prediction engine
//!
//! Turns one integrated race record (six entrants, exhibition data,
//! historical stats, weather) into a per-lane feature profile, a simulated
//! probability distribution over finishing-order triples, and a fixed-size
//! betting ticket set approximating that distribution.
//!
//! ## Properties
//! - 100% deterministic: same record + same seed = byte-identical output
//! - Trial loop runs on rayon without changing the result
//! - Missing input fields degrade to documented defaults, never to NaN

pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod simulation;
pub mod tickets;

#[cfg(test)]
pub mod test_fixtures;

pub use error::{PredictError, Result};
pub use features::{AttackType, StrengthClass, VenueId};
pub use models::{IntegratedRace, PredictionRecord, Scenario};
pub use pipeline::{predict, PredictConfig};
pub use simulation::{ProbabilityMap, SimulationConfig};
pub use tickets::Triple;
