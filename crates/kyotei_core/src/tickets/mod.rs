//! Ticket notation and synthesis.

pub mod notation;
pub mod synthesizer;

pub use notation::{compact, expand, Notation, Triple};
pub use synthesizer::{from_probability_map, from_scenarios, SynthesizedTickets, DEFAULT_TARGET};
