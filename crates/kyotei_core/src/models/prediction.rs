//! Prediction record - the single output shape of the core.

use serde::{Deserialize, Serialize};

use crate::features::{AttackType, StrengthClass};
use crate::simulation::performance::PerformanceProfile;
use crate::tickets::Triple;

use super::race::RaceMeta;

/// Ranked per-lane features as reported to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub lane: u8,
    pub start_course: u8,
    pub predicted_st: f64,
    pub strength_class: StrengthClass,
    pub score: f64,
    pub upset_score: f64,
    pub profile: PerformanceProfile,
}

/// One entry of the serialized probability distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripleProbability {
    pub triple: Triple,
    pub probability: f64,
}

/// The synthesized ticket set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSet {
    /// Compact notation per selected expansion, e.g. "1-23-456".
    pub compact: Vec<String>,
    /// Fully expanded, duplicate-free triples.
    pub triples: Vec<Triple>,
    pub target: usize,
    /// Non-zero when the target could not be reached; never silently padded.
    pub shortfall: usize,
}

/// Full prediction for one race.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub meta: RaceMeta,
    /// Lanes in predicted slit arrival order.
    pub slit_order: [u8; 6],
    pub attack: AttackType,
    /// Per-lane reports sorted by descending score.
    pub lanes: Vec<LaneReport>,
    /// Finish-triple distribution sorted by descending probability. Empty
    /// when the simulation produced no weighted trials.
    pub probabilities: Vec<TripleProbability>,
    pub tickets: TicketSet,
}

impl PredictionRecord {
    /// Companion human-readable summary: ranking, attack, top triples and
    /// the ticket set.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} R{:02}\n",
            self.meta.date,
            self.meta.venue.name(),
            self.meta.race_no
        ));
        out.push_str(&format!(
            "slit: {}  attack: {}\n",
            self.slit_order.map(|l| l.to_string()).join("-"),
            self.attack
        ));

        for report in &self.lanes {
            out.push_str(&format!(
                "  lane {} [{}] st {:.2}  score {:.1}  upset {:.0}\n",
                report.lane,
                report.strength_class.label(),
                report.predicted_st,
                report.score,
                report.upset_score
            ));
        }

        if self.probabilities.is_empty() {
            out.push_str("no valid trials - empty distribution\n");
        } else {
            out.push_str("top finishes:\n");
            for tp in self.probabilities.iter().take(5) {
                out.push_str(&format!("  {}  {:.1}%\n", tp.triple, tp.probability * 100.0));
            }
        }

        out.push_str(&format!(
            "tickets ({}/{}): {}\n",
            self.tickets.triples.len(),
            self.tickets.target,
            self.tickets.compact.join(", ")
        ));
        if self.tickets.shortfall > 0 {
            out.push_str(&format!("SHORTFALL: {} tickets missing\n", self.tickets.shortfall));
        }
        out
    }
}
