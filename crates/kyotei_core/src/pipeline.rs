//! Pipeline orchestration: integrated race record in, prediction record out.
//!
//! Stages run strictly downward: validation, feature derivation, performance
//! model, realization sampling, ticket synthesis. One invocation processes
//! one race; nothing persists between invocations.

use tracing::{info, warn};

use crate::error::Result;
use crate::features::{self, attack::ST_GAP_SMALL, AttackType};
use crate::models::prediction::{LaneReport, PredictionRecord, TicketSet, TripleProbability};
use crate::models::race::IntegratedRace;
use crate::models::scenario::Scenario;
use crate::simulation::{build_profiles, sample, SimulationConfig, StartHypothesis};
use crate::tickets::{self, SynthesizedTickets};

/// Default base seed for the trial PRNG.
pub const DEFAULT_SEED: u64 = 0x6b79_6f74_6569;

/// Per-invocation parameters of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PredictConfig {
    pub seed: Option<u64>,
    pub simulation: SimulationConfig,
    pub target_tickets: Option<usize>,
    /// When present and non-empty, scenarios replace the probability map as
    /// the ticket source.
    pub scenarios: Option<Vec<Scenario>>,
    /// Overrides the linked pair inferred from the attack type.
    pub linked_pairs: Option<Vec<(u8, u8)>>,
}

/// Run the full prediction pipeline for one race.
pub fn predict(race: &IntegratedRace, cfg: &PredictConfig) -> Result<PredictionRecord> {
    race.validate()?;

    let seed = cfg.seed.unwrap_or(DEFAULT_SEED);
    let target = cfg.target_tickets.unwrap_or(tickets::DEFAULT_TARGET);

    let derived = features::derive(race);
    let profiles = build_profiles(race, &derived);

    let linked_pairs = cfg
        .linked_pairs
        .clone()
        .unwrap_or_else(|| linked_pair_for_attack(&derived, derived.attack).into_iter().collect());
    let hypothesis = StartHypothesis {
        slots: ambiguous_slots(&derived),
        linked_pairs,
    };

    let map = sample(
        &hypothesis,
        &derived.slit_order,
        &profiles,
        &cfg.simulation,
        seed,
    );
    if map.is_empty() {
        warn!(race = %race.meta.race_id(), "empty probability map, tickets will undershoot");
    }

    let synthesized: SynthesizedTickets = match cfg.scenarios.as_deref() {
        Some(scenarios) if !scenarios.is_empty() => tickets::from_scenarios(scenarios, target),
        _ => tickets::from_probability_map(&map, target),
    };

    let mut lanes: Vec<LaneReport> = derived
        .lanes
        .iter()
        .map(|f| LaneReport {
            lane: f.lane,
            start_course: f.start_course,
            predicted_st: f.predicted_st,
            strength_class: f.strength_class,
            score: f.score,
            upset_score: f.upset_score,
            profile: profiles[(f.lane - 1) as usize],
        })
        .collect();
    lanes.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.lane.cmp(&b.lane))
    });

    let probabilities: Vec<TripleProbability> = map
        .sorted_desc()
        .into_iter()
        .map(|(triple, probability)| TripleProbability { triple, probability })
        .collect();

    info!(
        race = %race.meta.race_id(),
        attack = %derived.attack,
        triples = probabilities.len(),
        tickets = synthesized.triples.len(),
        "prediction complete"
    );

    Ok(PredictionRecord {
        meta: race.meta.clone(),
        slit_order: derived.slit_order,
        attack: derived.attack,
        lanes,
        probabilities,
        tickets: TicketSet {
            compact: synthesized.compact,
            triples: synthesized.triples,
            target: synthesized.target,
            shortfall: synthesized.shortfall,
        },
    })
}

/// Candidate sets per slit position. Adjacent starters whose adjusted STs sit
/// within the small gap are treated as interchangeable pairs; everyone else
/// keeps a fixed slot.
fn ambiguous_slots(derived: &features::DerivedFeatures) -> Vec<Vec<u8>> {
    let order = &derived.slit_order;
    let slots_st: Vec<f64> = derived.slit_slots.iter().map(|s| s.predicted_st).collect();

    let mut slots: Vec<Vec<u8>> = Vec::with_capacity(6);
    let mut i = 0;
    while i < 6 {
        if i + 1 < 6 && slots_st[i + 1] - slots_st[i] < ST_GAP_SMALL {
            let pair = vec![order[i], order[i + 1]];
            slots.push(pair.clone());
            slots.push(pair);
            i += 2;
        } else {
            slots.push(vec![order[i]]);
            i += 1;
        }
    }
    slots
}

/// Default linked-pair hypothesis per attack type. Hand-tuned folklore: the
/// boat riding the attacker's wake finishes right behind it.
fn linked_pair_for_attack(
    derived: &features::DerivedFeatures,
    attack: AttackType,
) -> Option<(u8, u8)> {
    let lane_of = |course: u8| {
        derived
            .lanes
            .iter()
            .find(|f| f.start_course == course)
            .map(|f| f.lane)
    };
    let (first, second) = match attack {
        AttackType::OutsideSweep => (4, 5),
        AttackType::SweepThrough => (3, 1),
        AttackType::InsidePass => (2, 4),
        AttackType::None => (1, 2),
    };
    Some((lane_of(first)?, lane_of(second)?))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::test_fixtures::build_race;

    use super::*;

    #[test]
    fn full_pipeline_produces_a_complete_record() {
        let race = build_race();
        let record = predict(&race, &PredictConfig::default()).unwrap();

        assert_eq!(record.meta, race.meta);
        assert_eq!(record.lanes.len(), 6);

        let total: f64 = record.probabilities.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);

        assert_eq!(record.tickets.triples.len(), 18);
        assert_eq!(record.tickets.shortfall, 0);
        let unique: BTreeSet<_> = record.tickets.triples.iter().collect();
        assert_eq!(unique.len(), 18);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let race = build_race();
        let cfg = PredictConfig::default();
        let a = predict(&race, &cfg).unwrap();
        let b = predict(&race, &cfg).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn five_entrants_abort_with_the_race_id() {
        let mut race = build_race();
        race.entries.pop();
        let err = predict(&race, &PredictConfig::default()).unwrap_err();
        assert!(err.to_string().contains(&race.meta.race_id()));
    }

    #[test]
    fn scenarios_replace_the_simulated_distribution() {
        let race = build_race();
        let cfg = PredictConfig {
            scenarios: Some(vec![Scenario::new(
                vec![4],
                vec![3, 5],
                vec![1, 2, 3, 5, 6],
                1.0,
            )]),
            ..PredictConfig::default()
        };
        let record = predict(&race, &cfg).unwrap();
        assert!(record.tickets.triples.iter().all(|t| t.first() == 4));
    }

    #[test]
    fn zero_trials_degrade_to_a_reported_undershoot() {
        let race = build_race();
        let cfg = PredictConfig {
            simulation: SimulationConfig {
                trials: 0,
                ..SimulationConfig::default()
            },
            ..PredictConfig::default()
        };
        let record = predict(&race, &cfg).unwrap();
        assert!(record.probabilities.is_empty());
        assert!(record.tickets.triples.is_empty());
        assert_eq!(record.tickets.shortfall, 18);
    }

    #[test]
    fn custom_target_is_honored() {
        let race = build_race();
        let cfg = PredictConfig {
            target_tickets: Some(12),
            ..PredictConfig::default()
        };
        let record = predict(&race, &cfg).unwrap();
        assert_eq!(record.tickets.triples.len(), 12);
        assert_eq!(record.tickets.target, 12);
    }
}
