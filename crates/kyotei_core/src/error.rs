use thiserror::Error;

/// Errors surfaced by the prediction pipeline.
///
/// Precondition failures are fatal for the race being processed and always
/// carry the race identifier, so callers can report which race was dropped.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("race {race_id}: expected {expected} entrants, found {found}")]
    InvalidEntryCount {
        race_id: String,
        expected: usize,
        found: usize,
    },

    #[error("race {race_id}: {reason}")]
    InvalidRecord { race_id: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PredictError>;
