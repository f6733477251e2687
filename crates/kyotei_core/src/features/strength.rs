//! Strength classification.
//!
//! An additive point score over six tiers of the racecard stats, mapped to
//! the familiar class ladder. The class factor feeds the performance model;
//! the raw points feed the composite lane score.

use serde::{Deserialize, Serialize};

use crate::models::race::RaceEntry;

/// Ordinal class label, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthClass {
    A1,
    A2,
    B1Upper,
    B1Mid,
    B1Lower,
    B2,
}

impl StrengthClass {
    /// Fixed multiplier per class, consumed by the performance model.
    pub fn class_factor(self) -> f64 {
        match self {
            StrengthClass::A1 => 1.00,
            StrengthClass::A2 => 0.85,
            StrengthClass::B1Upper => 0.70,
            StrengthClass::B1Mid => 0.55,
            StrengthClass::B1Lower => 0.40,
            StrengthClass::B2 => 0.25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthClass::A1 => "A1",
            StrengthClass::A2 => "A2",
            StrengthClass::B1Upper => "B1+",
            StrengthClass::B1Mid => "B1",
            StrengthClass::B1Lower => "B1-",
            StrengthClass::B2 => "B2",
        }
    }
}

// Neutral fallbacks for absent stats; chosen so a blank card lands mid-table.
const DEFAULT_NATIONAL_WIN_RATE: f64 = 4.0;
const DEFAULT_MOTOR_TOP2: f64 = 30.0;
const DEFAULT_AGE: u8 = 38;
const DEFAULT_AVG_ST: f64 = 0.17;
const DEFAULT_COURSE_WIN_RATE: f64 = 4.0;

/// Total strength points for one entrant. Exposed separately from the class
/// because the composite lane score reuses the raw value.
pub fn strength_points(entry: &RaceEntry) -> i32 {
    let national = entry.national_win_rate.unwrap_or(DEFAULT_NATIONAL_WIN_RATE);
    let local = entry.local_win_rate.unwrap_or(national);
    let motor = entry.motor_top2_rate.unwrap_or(DEFAULT_MOTOR_TOP2);
    let age = entry.age.unwrap_or(DEFAULT_AGE);
    let avg_st = entry.average_st.unwrap_or(DEFAULT_AVG_ST);
    let course_win = entry.course.win_rate.unwrap_or(DEFAULT_COURSE_WIN_RATE);

    national_points(national)
        + local_bonus(local, national)
        + motor_points(motor)
        + age_points(age)
        + st_points(avg_st)
        + course_points(course_win)
}

/// National win-rate tier, 1-6 points.
fn national_points(rate: f64) -> i32 {
    if rate >= 7.0 {
        6
    } else if rate >= 6.2 {
        5
    } else if rate >= 5.5 {
        4
    } else if rate >= 4.5 {
        3
    } else if rate >= 3.5 {
        2
    } else {
        1
    }
}

/// Local form against the national baseline, 0-2 points.
fn local_bonus(local: f64, national: f64) -> i32 {
    if local >= national + 0.5 {
        2
    } else if local >= national {
        1
    } else {
        0
    }
}

/// Motor 2-place rate tier, -1..+2 points.
fn motor_points(rate: f64) -> i32 {
    if rate >= 45.0 {
        2
    } else if rate >= 35.0 {
        1
    } else if rate >= 25.0 {
        0
    } else {
        -1
    }
}

fn age_points(age: u8) -> i32 {
    if age <= 30 {
        1
    } else if age <= 45 {
        0
    } else {
        -1
    }
}

fn st_points(avg_st: f64) -> i32 {
    if avg_st <= 0.14 {
        1
    } else if avg_st <= 0.17 {
        0
    } else {
        -1
    }
}

fn course_points(win_rate: f64) -> i32 {
    if win_rate >= 6.0 {
        1
    } else if win_rate >= 4.0 {
        0
    } else {
        -1
    }
}

/// Map the point total onto the class ladder.
pub fn classify(entry: &RaceEntry) -> StrengthClass {
    match strength_points(entry) {
        p if p >= 9 => StrengthClass::A1,
        p if p >= 7 => StrengthClass::A2,
        p if p >= 5 => StrengthClass::B1Upper,
        p if p >= 3 => StrengthClass::B1Mid,
        p if p >= 1 => StrengthClass::B1Lower,
        _ => StrengthClass::B2,
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::build_entry;

    use super::*;

    #[test]
    fn ace_card_classifies_as_a1() {
        let mut entry = build_entry(1);
        entry.national_win_rate = Some(7.5);
        entry.local_win_rate = Some(8.2);
        entry.motor_top2_rate = Some(48.0);
        entry.age = Some(28);
        entry.average_st = Some(0.13);
        entry.course.win_rate = Some(7.0);
        assert_eq!(classify(&entry), StrengthClass::A1);
    }

    #[test]
    fn weak_card_classifies_as_b2() {
        let mut entry = build_entry(6);
        entry.national_win_rate = Some(2.1);
        entry.local_win_rate = Some(1.8);
        entry.motor_top2_rate = Some(20.0);
        entry.age = Some(52);
        entry.average_st = Some(0.21);
        entry.course.win_rate = Some(1.0);
        assert_eq!(classify(&entry), StrengthClass::B2);
    }

    #[test]
    fn blank_card_resolves_to_a_valid_mid_class() {
        let mut entry = build_entry(3);
        entry.national_win_rate = None;
        entry.local_win_rate = None;
        entry.motor_top2_rate = None;
        entry.age = None;
        entry.average_st = None;
        entry.course.win_rate = None;
        let class = classify(&entry);
        assert!(class >= StrengthClass::A2 && class <= StrengthClass::B1Lower);
    }

    #[test]
    fn class_factor_is_monotonic_down_the_ladder() {
        let ladder = [
            StrengthClass::A1,
            StrengthClass::A2,
            StrengthClass::B1Upper,
            StrengthClass::B1Mid,
            StrengthClass::B1Lower,
            StrengthClass::B2,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0].class_factor() > pair[1].class_factor());
        }
    }
}
