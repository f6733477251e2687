//! Integrated race record - the single input shape of the prediction core.
//!
//! The record is produced upstream by the scraping/merge layer. The core only
//! validates the hard preconditions here (six entrants, lane/course
//! permutations); every soft gap in the data is an `Option` that Feature
//! Derivation resolves to a documented default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PredictError, Result};
use crate::features::venue::VenueId;

/// Courses 1-2 count as the inner wall.
pub const INNER_COURSE_MAX: u8 = 2;
/// Courses 4-6 are dash courses (standing start from further back).
pub const DASH_COURSE_MIN: u8 = 4;

/// Race identity, passed through unchanged into the prediction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceMeta {
    pub date: NaiveDate,
    pub venue: VenueId,
    pub race_no: u8,
}

impl RaceMeta {
    /// Stable identifier used in error reports and log lines.
    pub fn race_id(&self) -> String {
        format!(
            "{}-{:02}-{:02}",
            self.date.format("%Y%m%d"),
            self.venue.code(),
            self.race_no
        )
    }
}

/// Water and wind conditions at race time. Immutable input, consumed by every
/// adjustment stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceWeather {
    pub wind_speed: f64,
    pub wave_height: f64,
    #[serde(default)]
    pub wind_direction: String,
    #[serde(default)]
    pub stabilizer: bool,
}

/// Exhibition (tenji) results for one entrant. The ST text keeps the raw
/// notation because a flying start is written as an "F" prefix ("F.05").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    #[serde(default)]
    pub tenji_time: Option<f64>,
    #[serde(default)]
    pub st: Option<String>,
    #[serde(default)]
    pub tilt: f64,
    #[serde(default)]
    pub rank: Option<u8>,
    #[serde(default)]
    pub start_course: Option<u8>,
}

/// Opponent-side summaries for the course this entrant starts from: how often
/// the entrant lost by being overtaken on the outside or passed on the inside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentCourseStats {
    #[serde(default)]
    pub overtake_losses: u32,
    #[serde(default)]
    pub inside_pass_losses: u32,
}

/// Historical per-course summaries for one entrant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    #[serde(default)]
    pub avg_st: Option<f64>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub top2_rate: Option<f64>,
    #[serde(default)]
    pub top3_rate: Option<f64>,
    #[serde(default)]
    pub opponent: OpponentCourseStats,
}

/// One racecard entry, exactly one per lane 1-6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceEntry {
    pub lane: u8,
    #[serde(default)]
    pub racer_name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub average_st: Option<f64>,
    #[serde(default)]
    pub national_win_rate: Option<f64>,
    #[serde(default)]
    pub local_win_rate: Option<f64>,
    #[serde(default)]
    pub national_top3_rate: Option<f64>,
    #[serde(default)]
    pub motor_top2_rate: Option<f64>,
    #[serde(default)]
    pub boat_top2_rate: Option<f64>,
    #[serde(default)]
    pub motor_growth: bool,
    /// Flying starts recorded in the current term; each one makes the racer
    /// start more cautiously.
    #[serde(default)]
    pub flying_count: u32,
    #[serde(default)]
    pub exhibition: Exhibition,
    #[serde(default)]
    pub course: CourseStats,
}

impl RaceEntry {
    /// Actual pre-race lineup position; falls back to the lane when the
    /// exhibition did not report a course.
    pub fn start_course(&self) -> u8 {
        self.exhibition.start_course.unwrap_or(self.lane)
    }

    pub fn is_inner_course(&self) -> bool {
        self.start_course() <= INNER_COURSE_MAX
    }

    pub fn is_dash_course(&self) -> bool {
        self.start_course() >= DASH_COURSE_MIN
    }
}

/// The merged race record: weather plus six racecard entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedRace {
    pub meta: RaceMeta,
    pub weather: RaceWeather,
    pub entries: Vec<RaceEntry>,
}

impl IntegratedRace {
    /// Parse and validate a record in one step.
    pub fn from_json(json: &str) -> Result<Self> {
        let race: IntegratedRace = serde_json::from_str(json)?;
        race.validate()?;
        Ok(race)
    }

    /// Hard preconditions of the core. Anything that fails here aborts the
    /// race; the pipeline never produces a partial prediction.
    pub fn validate(&self) -> Result<()> {
        if self.entries.len() != 6 {
            return Err(PredictError::InvalidEntryCount {
                race_id: self.meta.race_id(),
                expected: 6,
                found: self.entries.len(),
            });
        }
        self.check_permutation(|e| e.lane, "lanes")?;
        self.check_permutation(|e| e.start_course(), "start courses")?;
        Ok(())
    }

    fn check_permutation(&self, key: impl Fn(&RaceEntry) -> u8, what: &str) -> Result<()> {
        let mut seen = [false; 7];
        for entry in &self.entries {
            let k = key(entry);
            if !(1..=6).contains(&k) || seen[k as usize] {
                return Err(PredictError::InvalidRecord {
                    race_id: self.meta.race_id(),
                    reason: format!("{} are not a permutation of 1..6", what),
                });
            }
            seen[k as usize] = true;
        }
        Ok(())
    }

    /// Entry starting from the given course. Only valid after `validate()`.
    pub fn entry_by_course(&self, course: u8) -> Option<&RaceEntry> {
        self.entries.iter().find(|e| e.start_course() == course)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::build_race;

    use super::*;

    #[test]
    fn valid_fixture_passes_validation() {
        build_race().validate().unwrap();
    }

    #[test]
    fn five_entries_is_a_precondition_failure() {
        let mut race = build_race();
        race.entries.pop();
        let err = race.validate().unwrap_err();
        match err {
            PredictError::InvalidEntryCount { found, .. } => assert_eq!(found, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_start_course_is_rejected() {
        let mut race = build_race();
        race.entries[3].exhibition.start_course = Some(1);
        let err = race.validate().unwrap_err();
        assert!(err.to_string().contains("start courses"));
    }

    #[test]
    fn start_course_falls_back_to_lane() {
        let mut race = build_race();
        race.entries[2].exhibition.start_course = None;
        assert_eq!(race.entries[2].start_course(), race.entries[2].lane);
    }

    #[test]
    fn inner_wall_stops_at_course_two() {
        let mut entry = crate::test_fixtures::build_entry(1);
        for course in 1..=6u8 {
            entry.exhibition.start_course = Some(course);
            assert_eq!(entry.is_inner_course(), course <= 2, "course {}", course);
            assert_eq!(entry.is_dash_course(), course >= 4, "course {}", course);
        }
    }

    #[test]
    fn record_round_trips_through_json() {
        let race = build_race();
        let json = serde_json::to_string(&race).unwrap();
        let back = IntegratedRace::from_json(&json).unwrap();
        assert_eq!(back.meta, race.meta);
        assert_eq!(back.entries.len(), 6);
    }
}
