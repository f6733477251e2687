//! Ticket Synthesizer.
//!
//! Approximates a weighted triple distribution with an exact-size ticket set.
//! Heads are processed by total weight; for each head a small grid search
//! over (second-set size K, third-set size M, notation) picks the expansion
//! whose fresh-ticket count lands closest to what is still needed, ties
//! broken toward not overshooting. Undershoot is backfilled from the highest
//! probability remaining triples; a remaining gap is reported, never padded.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use super::notation::{compact, expand, Notation, Triple};
use crate::models::scenario::Scenario;
use crate::simulation::sampler::ProbabilityMap;

/// Default number of tickets a prediction carries.
pub const DEFAULT_TARGET: usize = 18;

const SECOND_SET_SIZES: [usize; 3] = [2, 3, 4];
const THIRD_SET_SIZES: [usize; 4] = [3, 4, 5, 6];

/// Result of one synthesis: compact strings per selected expansion plus the
/// expanded, duplicate-free triples. `shortfall` is non-zero when the target
/// could not be reached even after backfill.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedTickets {
    pub compact: Vec<String>,
    pub triples: Vec<Triple>,
    pub target: usize,
    pub shortfall: usize,
}

/// Synthesize from a simulated probability map.
pub fn from_probability_map(map: &ProbabilityMap, target: usize) -> SynthesizedTickets {
    synthesize(map.sorted_desc(), target)
}

/// Synthesize from hand-authored scenarios instead of a simulation.
pub fn from_scenarios(scenarios: &[Scenario], target: usize) -> SynthesizedTickets {
    let mut weights: BTreeMap<Triple, f64> = BTreeMap::new();
    for scenario in scenarios {
        for triple in scenario.expand() {
            *weights.entry(triple).or_insert(0.0) += scenario.weight;
        }
    }
    let mut weighted: Vec<(Triple, f64)> = weights.into_iter().collect();
    weighted.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    synthesize(weighted, target)
}

fn synthesize(weighted: Vec<(Triple, f64)>, target: usize) -> SynthesizedTickets {
    let mut chosen: Vec<Triple> = Vec::with_capacity(target);
    let mut seen: BTreeSet<Triple> = BTreeSet::new();
    let mut compact_strings: Vec<String> = Vec::new();

    for head in ranked_heads(&weighted) {
        if chosen.len() >= target {
            break;
        }
        let seconds = ranked_by(&weighted, head, |t| t.second());
        let thirds = ranked_by(&weighted, head, |t| t.third());
        let needed = target - chosen.len();

        if let Some(best) = best_expansion(head, &seconds, &thirds, &seen, needed) {
            compact_strings.push(best.compact);
            for triple in best.fresh {
                seen.insert(triple);
                chosen.push(triple);
            }
        }
    }

    // Overshoot from the last expansion: keep the first `target` tickets.
    chosen.truncate(target);

    // Undershoot: backfill with the highest-probability remaining triples.
    if chosen.len() < target {
        for (triple, _) in &weighted {
            if chosen.len() >= target {
                break;
            }
            if seen.insert(*triple) {
                chosen.push(*triple);
            }
        }
    }

    let shortfall = target.saturating_sub(chosen.len());
    if shortfall > 0 {
        warn!(
            wanted = target,
            reached = chosen.len(),
            "ticket synthesis undershot the target"
        );
    }

    SynthesizedTickets {
        compact: compact_strings,
        triples: chosen,
        target,
        shortfall,
    }
}

/// Head lanes ranked by their total weight, strongest first.
fn ranked_heads(weighted: &[(Triple, f64)]) -> Vec<u8> {
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();
    for (triple, weight) in weighted {
        *totals.entry(triple.first()).or_insert(0.0) += weight;
    }
    let mut heads: Vec<(u8, f64)> = totals.into_iter().collect();
    heads.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    heads.into_iter().map(|(lane, _)| lane).collect()
}

/// Candidate lanes for one position under the given head, ranked by weight.
fn ranked_by(weighted: &[(Triple, f64)], head: u8, position: impl Fn(Triple) -> u8) -> Vec<u8> {
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();
    for (triple, weight) in weighted {
        if triple.first() == head {
            *totals.entry(position(*triple)).or_insert(0.0) += weight;
        }
    }
    let mut lanes: Vec<(u8, f64)> = totals.into_iter().collect();
    lanes.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    lanes.into_iter().map(|(lane, _)| lane).collect()
}

struct Expansion {
    compact: String,
    fresh: Vec<Triple>,
    /// Grid-search key: (distance to needed, overshoots, K, M, notation).
    key: (usize, bool, usize, usize, usize),
}

/// Grid search over (K, M, notation); minimizes |fresh − needed| with ties
/// broken toward not overshooting, then the smaller grid point.
fn best_expansion(
    head: u8,
    seconds: &[u8],
    thirds: &[u8],
    seen: &BTreeSet<Triple>,
    needed: usize,
) -> Option<Expansion> {
    let mut best: Option<Expansion> = None;

    for (ki, &k) in SECOND_SET_SIZES.iter().enumerate() {
        let second_set = &seconds[..k.min(seconds.len())];
        if second_set.is_empty() {
            continue;
        }
        for (mi, &m) in THIRD_SET_SIZES.iter().enumerate() {
            let third_set = &thirds[..m.min(thirds.len())];
            if third_set.is_empty() {
                continue;
            }
            for (ni, &notation) in Notation::ALL.iter().enumerate() {
                let fresh: Vec<Triple> = expand(head, second_set, third_set, notation)
                    .into_iter()
                    .filter(|t| !seen.contains(t))
                    .collect();
                if fresh.is_empty() {
                    continue;
                }
                let distance = fresh.len().abs_diff(needed);
                let key = (distance, fresh.len() > needed, ki, mi, ni);
                if best.as_ref().map_or(true, |b| key < b.key) {
                    best = Some(Expansion {
                        compact: compact(head, second_set, third_set, notation),
                        fresh,
                        key,
                    });
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Weighted triples concentrated on head 1, enough to expand 18 tickets.
    fn rich_distribution() -> Vec<(Triple, f64)> {
        let mut weighted = Vec::new();
        let mut weight = 1.0;
        for first in [1u8, 2, 3] {
            for second in 1..=6u8 {
                for third in 1..=6u8 {
                    if let Some(t) = Triple::new(first, second, third) {
                        weighted.push((t, weight));
                        weight *= 0.93;
                    }
                }
            }
        }
        weighted
    }

    fn assert_valid(tickets: &SynthesizedTickets) {
        let unique: BTreeSet<_> = tickets.triples.iter().collect();
        assert_eq!(unique.len(), tickets.triples.len(), "duplicate tickets");
        for t in &tickets.triples {
            let lanes = t.lanes();
            assert!(lanes.iter().all(|l| (1..=6).contains(l)));
        }
    }

    #[test]
    fn hits_the_exact_target_with_enough_candidates() {
        let tickets = synthesize(rich_distribution(), DEFAULT_TARGET);
        assert_valid(&tickets);
        assert_eq!(tickets.triples.len(), DEFAULT_TARGET);
        assert_eq!(tickets.shortfall, 0);
        assert!(!tickets.compact.is_empty());
    }

    #[test]
    fn hits_other_targets_too() {
        for target in [6, 12, 24] {
            let tickets = synthesize(rich_distribution(), target);
            assert_eq!(tickets.triples.len(), target, "target {}", target);
            assert_eq!(tickets.shortfall, 0);
        }
    }

    #[test]
    fn backfills_a_sparse_scenario_list_when_derivable() {
        // Only 10 unique triples carried by scenarios, but their candidate
        // sets let the grid expand past the target.
        let scenarios = vec![
            Scenario::new(vec![1], vec![2, 3], vec![2, 3, 4, 5, 6], 1.0),
            Scenario::new(vec![2], vec![1], vec![3, 4], 0.5),
        ];
        let tickets = from_scenarios(&scenarios, DEFAULT_TARGET);
        assert_valid(&tickets);
        assert_eq!(tickets.triples.len(), DEFAULT_TARGET);
        assert_eq!(tickets.shortfall, 0);
    }

    #[test]
    fn reports_a_shortfall_instead_of_padding() {
        let weighted: Vec<(Triple, f64)> = vec![
            (Triple::new(1, 2, 3).unwrap(), 0.5),
            (Triple::new(1, 2, 4).unwrap(), 0.3),
            (Triple::new(1, 3, 2).unwrap(), 0.2),
        ];
        let tickets = synthesize(weighted, DEFAULT_TARGET);
        assert_valid(&tickets);
        assert!(tickets.triples.len() < DEFAULT_TARGET);
        assert_eq!(
            tickets.shortfall,
            DEFAULT_TARGET - tickets.triples.len()
        );
    }

    #[test]
    fn empty_input_yields_an_empty_set_with_full_shortfall() {
        let tickets = synthesize(Vec::new(), DEFAULT_TARGET);
        assert!(tickets.triples.is_empty());
        assert_eq!(tickets.shortfall, DEFAULT_TARGET);
        assert!(tickets.compact.is_empty());
    }

    #[test]
    fn ties_break_toward_not_overshooting() {
        // needed = 4; Formation with K=2, M=3 yields up to 6, while K=2 with
        // a 2-lane third set yields 4. The search must prefer the exact fit.
        let weighted: Vec<(Triple, f64)> = vec![
            (Triple::new(1, 2, 4).unwrap(), 0.4),
            (Triple::new(1, 3, 5).unwrap(), 0.3),
            (Triple::new(1, 2, 5).unwrap(), 0.2),
            (Triple::new(1, 3, 4).unwrap(), 0.1),
        ];
        let tickets = synthesize(weighted, 4);
        assert_eq!(tickets.triples.len(), 4);
        assert_eq!(tickets.shortfall, 0);
    }
}
