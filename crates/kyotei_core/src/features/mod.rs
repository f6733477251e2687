//! Feature Derivation - raw racecard fields into normalized predictive
//! features, adjusted by weather first and venue second.

pub mod attack;
pub mod environment;
pub mod start_timing;
pub mod strength;
pub mod upset;
pub mod venue;

pub use attack::{decide_attack, AttackType, SlitSlot};
pub use strength::StrengthClass;
pub use venue::{VenueBias, VenueId};

use tracing::debug;

use crate::models::race::IntegratedRace;

// Composite score weights. The score only ranks lanes for reporting and for
// the venue/environment corrections; the simulator works off the profiles.
const SCORE_PER_STRENGTH_POINT: f64 = 8.0;
const SCORE_PER_EXHIBITION_STEP: f64 = 3.0;
const SCORE_MOTOR_WEIGHT: f64 = 0.3;
const DEFAULT_EXHIBITION_RANK: u8 = 4;

/// Derived features for one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneFeatures {
    pub lane: u8,
    pub start_course: u8,
    /// Weather-adjusted predicted ST, within [0.06, 0.35].
    pub predicted_st: f64,
    pub strength_class: StrengthClass,
    /// Composite strength score after environment and venue correction.
    pub score: f64,
    pub upset_score: f64,
}

/// Per-race output of Feature Derivation.
#[derive(Debug, Clone)]
pub struct DerivedFeatures {
    /// One entry per lane, ordered by lane number.
    pub lanes: Vec<LaneFeatures>,
    /// Lanes in predicted slit arrival order (earliest first).
    pub slit_order: [u8; 6],
    /// Courses in the same order, with their adjusted STs.
    pub slit_slots: Vec<SlitSlot>,
    pub attack: AttackType,
}

impl DerivedFeatures {
    pub fn by_lane(&self, lane: u8) -> &LaneFeatures {
        &self.lanes[(lane - 1) as usize]
    }
}

/// Derive all lane features, the slit order and the attack type for one
/// validated race.
pub fn derive(race: &IntegratedRace) -> DerivedFeatures {
    let weather = &race.weather;
    let venue_bias = race.meta.venue.bias();

    let mut lanes: Vec<LaneFeatures> = race
        .entries
        .iter()
        .map(|entry| {
            let env =
                environment::environment_adjustment(entry.start_course(), entry.exhibition.tilt, weather);

            let raw_st = start_timing::predicted_st(entry);
            let predicted_st = start_timing::clamp_st(raw_st + env.st_delta);

            let strength_class = strength::classify(entry);
            let exhibition_rank = entry.exhibition.rank.unwrap_or(DEFAULT_EXHIBITION_RANK);
            let base_score = strength::strength_points(entry) as f64 * SCORE_PER_STRENGTH_POINT
                + (6 - exhibition_rank.min(6)) as f64 * SCORE_PER_EXHIBITION_STEP
                + entry.motor_top2_rate.unwrap_or(30.0) * SCORE_MOTOR_WEIGHT;

            // Environment correction first, venue correction second.
            let mut score = base_score * env.score_mult;
            if entry.is_inner_course() {
                score *= venue_bias.inner;
            } else if entry.is_dash_course() {
                score *= venue_bias.outer;
            }

            let raw_upset = upset::upset_score(entry, predicted_st, weather);
            let upset_score = (raw_upset + env.upset_delta).clamp(0.0, 100.0);

            LaneFeatures {
                lane: entry.lane,
                start_course: entry.start_course(),
                predicted_st,
                strength_class,
                score,
                upset_score,
            }
        })
        .collect();
    lanes.sort_by_key(|f| f.lane);

    let (slit_order, slit_slots) = slit_order(&lanes);
    let attack = decide_attack(&slit_slots);

    // The venue's maneuver multiplier rewards the lane expected to attack.
    if let Some(course) = attacking_course(attack) {
        let mult = maneuver_multiplier(&venue_bias, attack);
        if let Some(f) = lanes.iter_mut().find(|f| f.start_course == course) {
            f.score *= mult;
        }
    }

    debug!(
        race = %race.meta.race_id(),
        ?attack,
        slit = ?slit_order,
        "features derived"
    );

    DerivedFeatures {
        lanes,
        slit_order,
        slit_slots,
        attack,
    }
}

/// Lanes sorted by adjusted predicted ST, ascending; ties favor the inner
/// course.
fn slit_order(lanes: &[LaneFeatures]) -> ([u8; 6], Vec<SlitSlot>) {
    let mut ordered: Vec<&LaneFeatures> = lanes.iter().collect();
    ordered.sort_by(|a, b| {
        a.predicted_st
            .partial_cmp(&b.predicted_st)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.start_course.cmp(&b.start_course))
    });

    let mut order = [0u8; 6];
    let mut slots = Vec::with_capacity(6);
    for (i, f) in ordered.iter().enumerate() {
        order[i] = f.lane;
        slots.push(SlitSlot {
            course: f.start_course,
            predicted_st: f.predicted_st,
        });
    }
    (order, slots)
}

fn attacking_course(attack: AttackType) -> Option<u8> {
    match attack {
        AttackType::OutsideSweep => Some(4),
        AttackType::SweepThrough => Some(3),
        AttackType::InsidePass => Some(2),
        AttackType::None => None,
    }
}

fn maneuver_multiplier(bias: &VenueBias, attack: AttackType) -> f64 {
    match attack {
        AttackType::OutsideSweep => bias.outside_sweep,
        AttackType::SweepThrough => bias.sweep_through,
        AttackType::InsidePass => bias.inside_pass,
        AttackType::None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::build_race;

    use super::*;

    #[test]
    fn derives_one_feature_set_per_lane() {
        let features = derive(&build_race());
        assert_eq!(features.lanes.len(), 6);
        for (i, f) in features.lanes.iter().enumerate() {
            assert_eq!(f.lane, i as u8 + 1);
            assert!((0.06..=0.35).contains(&f.predicted_st));
            assert!((0.0..=100.0).contains(&f.upset_score));
            assert!(f.score > 0.0);
        }
    }

    #[test]
    fn slit_order_is_a_lane_permutation_sorted_by_st() {
        let features = derive(&build_race());
        let mut seen = [false; 7];
        for lane in features.slit_order {
            assert!((1..=6).contains(&lane));
            assert!(!seen[lane as usize]);
            seen[lane as usize] = true;
        }
        for pair in features.slit_slots.windows(2) {
            assert!(pair[0].predicted_st <= pair[1].predicted_st);
        }
    }

    #[test]
    fn strong_wind_shifts_score_from_inner_to_dash() {
        let calm = derive(&build_race());
        let mut race = build_race();
        race.weather.wind_speed = 8.0;
        let windy = derive(&race);

        let calm_inner = calm.lanes.iter().find(|f| f.start_course == 1).unwrap();
        let windy_inner = windy.lanes.iter().find(|f| f.start_course == 1).unwrap();
        assert!(windy_inner.score < calm_inner.score);
        assert!(windy_inner.upset_score >= calm_inner.upset_score);
    }
}
