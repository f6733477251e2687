//! Performance Model Builder.
//!
//! Collapses the derived features of each lane into three bounded skill
//! scalars consumed only by the lap simulator. Weights are fixed constants.

use serde::{Deserialize, Serialize};

use crate::features::environment::toughness_index;
use crate::features::DerivedFeatures;
use crate::models::race::IntegratedRace;

/// Per-lane skill scalars, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    pub turn: f64,
    pub straight: f64,
    pub stability: f64,
}

// Straight = motor + exhibition + tilt + class.
const STRAIGHT_MOTOR_W: f64 = 0.35;
const STRAIGHT_EXHIBITION_W: f64 = 0.25;
const STRAIGHT_TILT_W: f64 = 0.15;
const STRAIGHT_CLASS_W: f64 = 0.25;

// Turn = national form + course form + exhibition + class.
const TURN_NATIONAL_W: f64 = 0.30;
const TURN_COURSE_W: f64 = 0.30;
const TURN_EXHIBITION_W: f64 = 0.15;
const TURN_CLASS_W: f64 = 0.25;

// Stability = class + stabilizer + tilt, damped by rough water.
const STABILITY_CLASS_W: f64 = 0.50;
const STABILITY_STABILIZER_W: f64 = 0.25;
const STABILITY_TILT_W: f64 = 0.25;
const STABILITY_TOUGHNESS_DAMPING: f64 = 0.5;

const MOTOR_RATE_SCALE: f64 = 60.0;
const TOP3_RATE_SCALE: f64 = 60.0;
const DEFAULT_MOTOR_RATE: f64 = 30.0;
const DEFAULT_TOP3_RATE: f64 = 30.0;
const DEFAULT_EXHIBITION_RANK: u8 = 4;

/// Build one profile per lane (index = lane - 1). Rough water lowers every
/// lane's stability, which widens the noise in the simulator.
pub fn build_profiles(race: &IntegratedRace, features: &DerivedFeatures) -> [PerformanceProfile; 6] {
    let toughness = toughness_index(&race.weather);

    let mut profiles = [PerformanceProfile {
        turn: 0.0,
        straight: 0.0,
        stability: 0.0,
    }; 6];

    for entry in &race.entries {
        let class_factor = features.by_lane(entry.lane).strength_class.class_factor();

        let motor = (entry.motor_top2_rate.unwrap_or(DEFAULT_MOTOR_RATE) / MOTOR_RATE_SCALE)
            .clamp(0.0, 1.0);
        let national_top3 = (entry.national_top3_rate.unwrap_or(DEFAULT_TOP3_RATE)
            / TOP3_RATE_SCALE)
            .clamp(0.0, 1.0);
        let course_top3 = (entry.course.top3_rate.unwrap_or(DEFAULT_TOP3_RATE) / TOP3_RATE_SCALE)
            .clamp(0.0, 1.0);

        // Rank 1 -> 1.0, rank 6 -> 0.0.
        let rank = entry.exhibition.rank.unwrap_or(DEFAULT_EXHIBITION_RANK).clamp(1, 6);
        let exhibition = (6 - rank) as f64 / 5.0;

        let tilt_indicator = if entry.exhibition.tilt > 0.0 {
            1.0
        } else if entry.exhibition.tilt < 0.0 {
            0.0
        } else {
            0.5
        };

        let straight = STRAIGHT_MOTOR_W * motor
            + STRAIGHT_EXHIBITION_W * exhibition
            + STRAIGHT_TILT_W * tilt_indicator
            + STRAIGHT_CLASS_W * class_factor;

        let turn = TURN_NATIONAL_W * national_top3
            + TURN_COURSE_W * course_top3
            + TURN_EXHIBITION_W * exhibition
            + TURN_CLASS_W * class_factor;

        let stabilizer = if race.weather.stabilizer { 1.0 } else { 0.0 };
        // Tilt down trades straight speed for composure at the turn.
        let tilt_calm = if entry.exhibition.tilt < 0.0 { 1.0 } else { 0.5 };
        let raw_stability = STABILITY_CLASS_W * class_factor
            + STABILITY_STABILIZER_W * stabilizer
            + STABILITY_TILT_W * tilt_calm;
        let stability = raw_stability * (1.0 - STABILITY_TOUGHNESS_DAMPING * toughness);

        profiles[(entry.lane - 1) as usize] = PerformanceProfile {
            turn: turn.clamp(0.0, 1.0),
            straight: straight.clamp(0.0, 1.0),
            stability: stability.clamp(0.0, 1.0),
        };
    }

    profiles
}
