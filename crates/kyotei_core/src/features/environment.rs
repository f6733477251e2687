//! Weather correction of the derived features.
//!
//! Applied before the venue correction. Wind and waves hurt the inner wall
//! and open the race for the dash side; a stabilizer claws part of that back.
//! All deltas are hand-tuned constants.

use crate::models::race::{RaceWeather, DASH_COURSE_MIN, INNER_COURSE_MAX};

/// Wind speed from which the start becomes genuinely unstable.
pub const STRONG_WIND_MS: f64 = 5.0;
/// Wave height from which hull stability starts to matter.
pub const HIGH_WAVE_M: f64 = 0.04;

const WIND_INNER_SCORE_MULT: f64 = 0.93;
const WIND_OUTER_SCORE_MULT: f64 = 1.04;
const WIND_INNER_UPSET: f64 = 6.0;
const WIND_OUTER_ST_DELTA: f64 = 0.01;

const WAVE_INNER_SCORE_MULT: f64 = 0.95;
const WAVE_INNER_UPSET: f64 = 4.0;
const WAVE_OUTER_ST_DELTA: f64 = 0.005;
const WAVE_STABILIZER_SCORE_MULT: f64 = 1.02;

const TILT_UP_OUTER_SCORE_MULT: f64 = 1.03;
const TILT_DOWN_INNER_SCORE_MULT: f64 = 1.02;

/// Corrections for one entrant, composed multiplicatively for the score and
/// additively for ST and upset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentAdjustment {
    pub st_delta: f64,
    pub score_mult: f64,
    pub upset_delta: f64,
}

impl EnvironmentAdjustment {
    pub const NEUTRAL: EnvironmentAdjustment = EnvironmentAdjustment {
        st_delta: 0.0,
        score_mult: 1.0,
        upset_delta: 0.0,
    };
}

/// Weather correction for the entrant starting from `course` with the given
/// tilt setting.
pub fn environment_adjustment(
    course: u8,
    tilt: f64,
    weather: &RaceWeather,
) -> EnvironmentAdjustment {
    let mut adj = EnvironmentAdjustment::NEUTRAL;
    let inner = course <= INNER_COURSE_MAX;
    let outer = course >= DASH_COURSE_MIN;

    if weather.wind_speed >= STRONG_WIND_MS {
        if inner {
            adj.score_mult *= WIND_INNER_SCORE_MULT;
            adj.upset_delta += WIND_INNER_UPSET;
        }
        if outer {
            adj.score_mult *= WIND_OUTER_SCORE_MULT;
            adj.st_delta += WIND_OUTER_ST_DELTA;
        }
    }

    if weather.wave_height >= HIGH_WAVE_M {
        if inner {
            adj.score_mult *= WAVE_INNER_SCORE_MULT;
            adj.upset_delta += WAVE_INNER_UPSET;
        }
        if weather.stabilizer {
            adj.score_mult *= WAVE_STABILIZER_SCORE_MULT;
        } else if outer {
            adj.st_delta += WAVE_OUTER_ST_DELTA;
        }
    }

    if tilt > 0.0 && outer {
        adj.score_mult *= TILT_UP_OUTER_SCORE_MULT;
    } else if tilt < 0.0 && inner {
        adj.score_mult *= TILT_DOWN_INNER_SCORE_MULT;
    }

    adj
}

/// 0-1 index of how rough the water is; the performance model uses it to
/// dampen everyone's stability.
pub fn toughness_index(weather: &RaceWeather) -> f64 {
    (weather.wind_speed / 10.0 + weather.wave_height * 5.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(wind: f64, wave: f64, stabilizer: bool) -> RaceWeather {
        RaceWeather {
            wind_speed: wind,
            wave_height: wave,
            wind_direction: String::new(),
            stabilizer,
        }
    }

    #[test]
    fn calm_water_is_neutral() {
        let adj = environment_adjustment(1, 0.0, &weather(1.0, 0.01, false));
        assert_eq!(adj, EnvironmentAdjustment::NEUTRAL);
    }

    #[test]
    fn strong_wind_hurts_the_inner_wall() {
        let adj = environment_adjustment(1, 0.0, &weather(6.0, 0.01, false));
        assert!(adj.score_mult < 1.0);
        assert!(adj.upset_delta > 0.0);
    }

    #[test]
    fn strong_wind_helps_the_dash_side_but_delays_its_start() {
        let adj = environment_adjustment(5, 0.0, &weather(6.0, 0.01, false));
        assert!(adj.score_mult > 1.0);
        assert!(adj.st_delta > 0.0);
    }

    #[test]
    fn stabilizer_recovers_part_of_the_wave_penalty() {
        let without = environment_adjustment(1, 0.0, &weather(0.0, 0.06, false));
        let with = environment_adjustment(1, 0.0, &weather(0.0, 0.06, true));
        assert!(with.score_mult > without.score_mult);
    }

    #[test]
    fn toughness_is_bounded() {
        assert_eq!(toughness_index(&weather(0.0, 0.0, false)), 0.0);
        assert_eq!(toughness_index(&weather(50.0, 2.0, false)), 1.0);
    }
}
