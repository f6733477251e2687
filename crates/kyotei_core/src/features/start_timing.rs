//! Predicted start timing (ST).
//!
//! The predicted ST is the single most reused feature: it drives the slit
//! order, the attack-type decision, the upset score and the start-order
//! sampler. The prediction is a blend of career averages and the exhibition
//! start, with fixed deltas for flying history, dash courses and motor
//! growth. Everything degrades to a documented default - a missing field
//! never turns into NaN.

use crate::models::race::RaceEntry;

/// Fallback when neither a career nor a course-specific average exists.
pub const DEFAULT_BASE_ST: f64 = 0.18;
/// Physical bounds of a plausible ST; the prediction never leaves them.
pub const ST_MIN: f64 = 0.06;
pub const ST_MAX: f64 = 0.35;

/// Subtracted when the exhibition start itself was a flying start.
const EXHIBITION_FLYING_BONUS: f64 = 0.01;
/// Added per flying start in the current term.
const FLYING_CAUTION_PENALTY: f64 = 0.05;
/// Subtracted for dash courses (4-6), which carry speed into the line.
const DASH_COURSE_BONUS: f64 = 0.01;
/// Subtracted when the motor is flagged as improving.
const MOTOR_GROWTH_BONUS: f64 = 0.005;

/// Exhibition ST parsed from its text form. "F.05" means a flying start by
/// 0.05 seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSt {
    pub value: f64,
    pub flying: bool,
}

/// Parse the raw ST text ("0.14", ".14", "F.05"). Returns `None` when the
/// text carries no usable number.
pub fn parse_st_text(text: &str) -> Option<ParsedSt> {
    let trimmed = text.trim();
    let (flying, rest) = match trimmed.strip_prefix('F').or_else(|| trimmed.strip_prefix('f')) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.trim();
    let value: f64 = if let Some(frac) = rest.strip_prefix('.') {
        format!("0.{}", frac).parse().ok()?
    } else {
        rest.parse().ok()?
    };
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(ParsedSt { value, flying })
}

/// Blend weight for the exhibition ST: the faster the exhibition start, the
/// more it is trusted over the career base.
fn exhibition_weight(exhibition_st: f64) -> f64 {
    if exhibition_st <= 0.10 {
        0.60
    } else if exhibition_st <= 0.12 {
        0.50
    } else if exhibition_st <= 0.15 {
        0.35
    } else {
        0.20
    }
}

/// Clamp into the physical ST range and round to two decimals, matching the
/// resolution the official cards publish.
pub fn clamp_st(st: f64) -> f64 {
    let clamped = st.clamp(ST_MIN, ST_MAX);
    (clamped * 100.0).round() / 100.0
}

/// Predicted ST for one entrant.
pub fn predicted_st(entry: &RaceEntry) -> f64 {
    let base = match (entry.average_st, entry.course.avg_st) {
        (Some(career), Some(course)) => (career + course) / 2.0,
        (Some(career), None) => career,
        (None, Some(course)) => course,
        (None, None) => DEFAULT_BASE_ST,
    };

    let mut st = match entry.exhibition.st.as_deref().and_then(parse_st_text) {
        Some(parsed) => {
            let w = exhibition_weight(parsed.value);
            let blended = base * (1.0 - w) + parsed.value * w;
            if parsed.flying {
                blended - EXHIBITION_FLYING_BONUS
            } else {
                blended
            }
        }
        None => base,
    };

    st += entry.flying_count as f64 * FLYING_CAUTION_PENALTY;
    if entry.is_dash_course() {
        st -= DASH_COURSE_BONUS;
    }
    if entry.motor_growth {
        st -= MOTOR_GROWTH_BONUS;
    }

    clamp_st(st)
}
