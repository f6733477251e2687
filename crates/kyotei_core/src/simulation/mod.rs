//! Performance model, stochastic lap simulator and the realization sampler.

pub mod config;
pub mod lap;
pub mod performance;
pub mod sampler;

pub use config::SimulationConfig;
pub use lap::{run_race, TrialOutcome};
pub use performance::{build_profiles, PerformanceProfile};
pub use sampler::{sample, ProbabilityMap, StartHypothesis};
