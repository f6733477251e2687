//! Hand-authored race scenarios.
//!
//! A scenario is a coarse hypothesis ("4 sweeps outside, 5 follows") written
//! as candidate sets per finish position with a probability weight. Scenario
//! lists can replace the simulation as the ticket source.

use serde::{Deserialize, Serialize};

use crate::tickets::Triple;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
    pub third: Vec<u8>,
    pub weight: f64,
}

impl Scenario {
    pub fn new(first: Vec<u8>, second: Vec<u8>, third: Vec<u8>, weight: f64) -> Self {
        Self {
            first,
            second,
            third,
            weight,
        }
    }

    /// All concrete triples this scenario covers; invalid combinations
    /// (collisions, out-of-range lanes) are skipped silently.
    pub fn expand(&self) -> Vec<Triple> {
        let mut triples = Vec::new();
        for &f in &self.first {
            for &s in &self.second {
                for &t in &self.third {
                    if let Some(triple) = Triple::new(f, s, t) {
                        if !triples.contains(&triple) {
                            triples.push(triple);
                        }
                    }
                }
            }
        }
        triples
    }
}
