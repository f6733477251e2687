//! Attack-type decision.
//!
//! Classifies the likely maneuver of the lane leading the slit, based on the
//! ST-sorted order and two fixed gap thresholds.

use serde::{Deserialize, Serialize};

use std::fmt;

/// ST edge that counts as a usable advantage over one neighbour.
pub const ST_GAP_SMALL: f64 = 0.007;
/// ST edge large enough to carry a dash boat past the whole inner wall.
pub const ST_GAP_LARGE: f64 = 0.012;

/// Likely maneuver of the slit leader at the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackType {
    /// Course 4 sweeps the entire inner wall from outside.
    OutsideSweep,
    /// Course 3 sweeps past course 2.
    SweepThrough,
    /// Course 2 cuts inside while course 4 attacks.
    InsidePass,
    None,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttackType::OutsideSweep => "outside sweep",
            AttackType::SweepThrough => "sweep-through",
            AttackType::InsidePass => "inside pass",
            AttackType::None => "none",
        };
        f.write_str(label)
    }
}

/// One slit-order slot: the start course and its adjusted predicted ST.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlitSlot {
    pub course: u8,
    pub predicted_st: f64,
}

/// Decide the attack type from the slit order (slots sorted ascending by
/// adjusted predicted ST, earliest first).
pub fn decide_attack(slit: &[SlitSlot]) -> AttackType {
    let st_of = |course: u8| {
        slit.iter()
            .find(|s| s.course == course)
            .map(|s| s.predicted_st)
    };
    let leader = match slit.first() {
        Some(slot) => slot.course,
        None => return AttackType::None,
    };

    match leader {
        4 => {
            let wall = match (st_of(2), st_of(3)) {
                (Some(c2), Some(c3)) => c2.min(c3),
                _ => return AttackType::None,
            };
            let edge = wall - slit[0].predicted_st;
            if edge >= ST_GAP_LARGE {
                AttackType::OutsideSweep
            } else if slit.get(1).map(|s| s.course) == Some(2) {
                AttackType::InsidePass
            } else {
                AttackType::None
            }
        }
        3 => match st_of(2) {
            Some(c2) if c2 - slit[0].predicted_st >= ST_GAP_SMALL => AttackType::SweepThrough,
            _ => AttackType::None,
        },
        _ => AttackType::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slit(pairs: &[(u8, f64)]) -> Vec<SlitSlot> {
        let mut slots: Vec<SlitSlot> = pairs
            .iter()
            .map(|&(course, predicted_st)| SlitSlot { course, predicted_st })
            .collect();
        slots.sort_by(|a, b| a.predicted_st.partial_cmp(&b.predicted_st).unwrap());
        slots
    }

    #[test]
    fn course_4_with_a_large_edge_sweeps_outside() {
        let slots = slit(&[
            (1, 0.16),
            (2, 0.15),
            (3, 0.15),
            (4, 0.13),
            (5, 0.17),
            (6, 0.18),
        ]);
        assert_eq!(decide_attack(&slots), AttackType::OutsideSweep);
    }

    #[test]
    fn course_3_with_an_edge_over_2_sweeps_through() {
        let slots = slit(&[
            (1, 0.16),
            (2, 0.16),
            (3, 0.14),
            (4, 0.17),
            (5, 0.17),
            (6, 0.18),
        ]);
        assert_eq!(decide_attack(&slots), AttackType::SweepThrough);
    }

    #[test]
    fn course_2_slips_inside_a_leading_4() {
        let slots = slit(&[
            (1, 0.17),
            (2, 0.15),
            (3, 0.16),
            (4, 0.145),
            (5, 0.18),
            (6, 0.18),
        ]);
        assert_eq!(decide_attack(&slots), AttackType::InsidePass);
    }

    #[test]
    fn level_slit_decides_nothing() {
        let slots = slit(&[
            (1, 0.15),
            (2, 0.15),
            (3, 0.15),
            (4, 0.15),
            (5, 0.15),
            (6, 0.15),
        ]);
        assert_eq!(decide_attack(&slots), AttackType::None);
    }
}
