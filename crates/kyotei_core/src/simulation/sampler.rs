//! Scenario/Realization Sampler.
//!
//! The slit order is itself uncertain: near-simultaneous starters form
//! candidate sets for their positions. Each trial materializes one concrete
//! order by weighted random choice, runs the lap simulator and accumulates
//! the top-3 finish into a weight counter; declared linked pairs boost the
//! trials they finish in front of.
//!
//! Trials are independent given their index-derived seed, so the loop runs on
//! rayon. Outcomes are collected in trial order and accumulated sequentially,
//! which keeps the resulting map bit-identical to a single-threaded run.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use super::config::SimulationConfig;
use super::lap::run_race;
use super::performance::PerformanceProfile;
use crate::tickets::Triple;

/// Start-order uncertainty for one race.
#[derive(Debug, Clone, Default)]
pub struct StartHypothesis {
    /// Candidate lanes per slit position, front to back. A set with more
    /// than one lane means "any of these may take the position".
    pub slots: Vec<Vec<u8>>,
    /// Lane pairs whose 1-2 finish in the given order is a strong
    /// hypothesis; trials ending that way get the configured boost.
    pub linked_pairs: Vec<(u8, u8)>,
}

/// Normalized probability per ordered finish triple. Ordered map so the
/// serialized output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbabilityMap(BTreeMap<Triple, f64>);

impl ProbabilityMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, triple: Triple) -> f64 {
        self.0.get(&triple).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Triple, f64)> + '_ {
        self.0.iter().map(|(&t, &p)| (t, p))
    }

    /// Triples sorted by descending probability, ties by triple order.
    pub fn sorted_desc(&self) -> Vec<(Triple, f64)> {
        let mut v: Vec<(Triple, f64)> = self.iter().collect();
        v.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
        v
    }

    /// Total probability mass of triples whose first two lanes match the
    /// given prefix in order.
    pub fn prefix_mass(&self, first: u8, second: u8) -> f64 {
        self.iter()
            .filter(|(t, _)| t.first() == first && t.second() == second)
            .map(|(_, p)| p)
            .sum()
    }
}

/// Run the full trial loop and aggregate into a probability map.
///
/// The map is empty when no trial produced weight (zero trials, degenerate
/// hypothesis); callers must handle that case instead of assuming mass.
pub fn sample(
    hypothesis: &StartHypothesis,
    slit_order: &[u8; 6],
    profiles: &[PerformanceProfile; 6],
    cfg: &SimulationConfig,
    base_seed: u64,
) -> ProbabilityMap {
    let outcomes: Vec<(Triple, f64)> = (0..cfg.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha8Rng::seed_from_u64(trial_seed(base_seed, trial));
            let order = materialize_order(hypothesis, slit_order, cfg, &mut rng);
            let outcome = run_race(&order, profiles, cfg, &mut rng);
            let top3 = outcome.top3();
            let triple = Triple::new(top3[0], top3[1], top3[2])
                .expect("simulator produced a lane permutation");

            let mut weight = 1.0;
            for &(a, b) in &hypothesis.linked_pairs {
                if top3[0] == a && top3[1] == b {
                    weight *= cfg.linked_pair_boost;
                }
            }
            (triple, weight)
        })
        .collect();

    // Deterministic reduction: trial order, not thread order.
    let mut counts: FxHashMap<Triple, f64> = FxHashMap::default();
    for (triple, weight) in outcomes {
        *counts.entry(triple).or_insert(0.0) += weight;
    }

    let total: f64 = counts.values().sum();
    if total <= 0.0 {
        warn!(trials = cfg.trials, "no weighted trials, probability map is empty");
        return ProbabilityMap::default();
    }

    ProbabilityMap(
        counts
            .into_iter()
            .map(|(triple, weight)| (triple, weight / total))
            .collect(),
    )
}

/// Seed for one trial, derived from the trial index alone so parallel runs
/// reproduce the sequential ones.
fn trial_seed(base_seed: u64, trial: u32) -> u64 {
    base_seed.wrapping_add(u64::from(trial).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Materialize a concrete 6-lane order from the hypothesis. Ambiguous slots
/// pick one unused candidate by weighted choice favoring the earlier slit
/// ranks; whatever remains is back-filled in slit order.
fn materialize_order(
    hypothesis: &StartHypothesis,
    slit_order: &[u8; 6],
    cfg: &SimulationConfig,
    rng: &mut impl Rng,
) -> [u8; 6] {
    let slit_rank = |lane: u8| -> usize {
        slit_order
            .iter()
            .position(|&l| l == lane)
            .unwrap_or(slit_order.len())
    };

    let mut used = [false; 7];
    let mut order: Vec<u8> = Vec::with_capacity(6);

    for slot in &hypothesis.slots {
        if order.len() == 6 {
            break;
        }
        let available: Vec<u8> = slot
            .iter()
            .copied()
            .filter(|&lane| (1..=6).contains(&lane) && !used[lane as usize])
            .collect();
        let picked = match available.len() {
            0 => continue,
            1 => available[0],
            _ => weighted_pick(&available, &slit_rank, cfg.slot_weight_epsilon, rng),
        };
        used[picked as usize] = true;
        order.push(picked);
    }

    // Back-fill the tail from the slit order.
    for &lane in slit_order {
        if order.len() == 6 {
            break;
        }
        if !used[lane as usize] {
            used[lane as usize] = true;
            order.push(lane);
        }
    }

    order.try_into().expect("six lanes materialized")
}

/// Weighted choice: weight = distance from the back of the slit plus epsilon,
/// so lanes predicted to reach the slit earlier are favored.
fn weighted_pick(
    candidates: &[u8],
    slit_rank: &impl Fn(u8) -> usize,
    epsilon: f64,
    rng: &mut impl Rng,
) -> u8 {
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&lane| (6 - slit_rank(lane).min(5)) as f64 + epsilon)
        .collect();
    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen_range(0.0..total);
    for (lane, weight) in candidates.iter().zip(&weights) {
        if roll < *weight {
            return *lane;
        }
        roll -= weight;
    }
    candidates[candidates.len() - 1]
}
