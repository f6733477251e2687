//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::features::VenueId;
use crate::models::race::{
    CourseStats, Exhibition, IntegratedRace, RaceEntry, RaceMeta, RaceWeather,
};

pub fn calm_weather() -> RaceWeather {
    RaceWeather {
        wind_speed: 1.0,
        wave_height: 0.01,
        wind_direction: "N".to_string(),
        stabilizer: false,
    }
}

/// One plausible entry on the given lane, starting from its own course.
pub fn build_entry(lane: u8) -> RaceEntry {
    RaceEntry {
        lane,
        racer_name: format!("Racer {}", lane),
        age: Some(30 + lane),
        average_st: Some(0.14 + lane as f64 * 0.01),
        national_win_rate: Some(6.8 - lane as f64 * 0.6),
        local_win_rate: Some(6.9 - lane as f64 * 0.6),
        national_top3_rate: Some(48.0 - lane as f64 * 4.0),
        motor_top2_rate: Some(38.0 - lane as f64 * 1.5),
        boat_top2_rate: Some(32.0),
        motor_growth: lane == 4,
        flying_count: 0,
        exhibition: Exhibition {
            tenji_time: Some(6.70 + lane as f64 * 0.02),
            st: Some(format!("0.{:02}", 12 + lane)),
            tilt: if lane >= 5 { 0.5 } else { 0.0 },
            rank: Some(lane),
            start_course: Some(lane),
        },
        course: CourseStats {
            avg_st: Some(0.15 + lane as f64 * 0.01),
            win_rate: Some(6.0 - lane as f64 * 0.7),
            top2_rate: Some(45.0 - lane as f64 * 4.0),
            top3_rate: Some(55.0 - lane as f64 * 5.0),
            opponent: Default::default(),
        },
    }
}

/// A valid six-entrant race at Heiwajima, race 11, in calm water.
pub fn build_race() -> IntegratedRace {
    IntegratedRace {
        meta: RaceMeta {
            date: NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date"),
            venue: VenueId::Heiwajima,
            race_no: 11,
        },
        weather: calm_weather(),
        entries: (1..=6).map(build_entry).collect(),
    }
}
