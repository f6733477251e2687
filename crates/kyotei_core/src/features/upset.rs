//! Per-lane upset propensity, 0-100.
//!
//! A heuristic sum: high values on an outer lane mean it can realistically
//! break the formation; high values on an inner lane mean it is vulnerable
//! to being broken. Components follow the historical opponent summaries, the
//! exhibition, the motor and the weather severity.

use crate::models::race::{RaceEntry, RaceWeather};

const BASE_UPSET: f64 = 20.0;

/// Opponent-loss count from which the inner wall counts as leaky.
const VULNERABILITY_THRESHOLD: u32 = 3;
const OVERTAKE_VULNERABILITY: f64 = 6.0;
const INSIDE_PASS_VULNERABILITY: f64 = 6.0;

/// Course-2 top-2 rate that makes a reliable wall.
const WALL_TOP2_THRESHOLD: f64 = 35.0;
const WALL_STRONG_DELTA: f64 = -8.0;
const WALL_WEAK_DELTA: f64 = 4.0;

const EXHIBITION_RANK_BONUS: f64 = 10.0;
const MOTOR_OUTER_THRESHOLD: f64 = 40.0;
const MOTOR_OUTER_BONUS: f64 = 8.0;

const FAST_ST_THRESHOLD: f64 = 0.13;
const FAST_ST_BONUS: f64 = 8.0;
const FAST_ST_DASH_BONUS: f64 = 12.0;

const TILT_UP_BONUS: f64 = 5.0;

/// Caps the weather severity term.
const WEATHER_SEVERITY_MAX: f64 = 15.0;

/// Upset score for one entrant, given its already-predicted ST.
pub fn upset_score(entry: &RaceEntry, predicted_st: f64, weather: &RaceWeather) -> f64 {
    let mut score = BASE_UPSET;
    let course = entry.start_course();

    if entry.is_inner_course() {
        if entry.course.opponent.overtake_losses >= VULNERABILITY_THRESHOLD {
            score += OVERTAKE_VULNERABILITY;
        }
        if entry.course.opponent.inside_pass_losses >= VULNERABILITY_THRESHOLD {
            score += INSIDE_PASS_VULNERABILITY;
        }
    }

    if course == 2 {
        if entry.course.top2_rate.unwrap_or(0.0) >= WALL_TOP2_THRESHOLD {
            score += WALL_STRONG_DELTA;
        } else {
            score += WALL_WEAK_DELTA;
        }
    }

    if entry.exhibition.rank.map_or(false, |r| r <= 2) {
        score += EXHIBITION_RANK_BONUS;
    }

    if entry.is_dash_course() && entry.motor_top2_rate.unwrap_or(0.0) >= MOTOR_OUTER_THRESHOLD {
        score += MOTOR_OUTER_BONUS;
    }

    if predicted_st <= FAST_ST_THRESHOLD {
        score += if entry.is_dash_course() {
            FAST_ST_DASH_BONUS
        } else {
            FAST_ST_BONUS
        };
    }

    if entry.exhibition.tilt > 0.0 {
        score += TILT_UP_BONUS;
    }

    score += weather_severity(weather);

    score.clamp(0.0, 100.0)
}

/// Additive severity term scaled by wind and wave magnitude.
fn weather_severity(weather: &RaceWeather) -> f64 {
    (weather.wind_speed * 1.5 + weather.wave_height * 50.0).min(WEATHER_SEVERITY_MAX)
}
