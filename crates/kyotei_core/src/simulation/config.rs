//! Simulation tuning constants.
//!
//! All values are hand-tuned; none of them is learned. They live in one
//! struct so experiments and tests can override them without touching the
//! simulator.

/// Knobs of the stochastic race simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of Monte Carlo trials per race.
    pub trials: u32,
    /// Discrete laps per trial; each lap is one turn phase plus one straight
    /// phase.
    pub laps: u32,
    /// Deterministic skill swing per turn phase.
    pub turn_amplitude: f64,
    /// Deterministic skill swing per straight phase.
    pub straight_amplitude: f64,
    /// Noise swing per turn phase, damped by stability.
    pub turn_noise: f64,
    /// Noise swing per straight phase, damped by stability.
    pub straight_noise: f64,
    /// Head start per slit position; position i starts with
    /// `(5 - i) * start_advantage` accumulated score.
    pub start_advantage: f64,
    /// Weight multiplier for trials finishing with a linked pair in order.
    pub linked_pair_boost: f64,
    /// Epsilon added to the slit-rank weight when materializing candidates.
    pub slot_weight_epsilon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            laps: 3,
            turn_amplitude: 0.22,
            straight_amplitude: 0.18,
            turn_noise: 0.12,
            straight_noise: 0.10,
            start_advantage: 0.08,
            linked_pair_boost: 1.5,
            slot_weight_epsilon: 0.1,
        }
    }
}
