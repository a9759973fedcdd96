use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ScoringError {
    #[error("participant {participant_id} has no resolvable handicap")]
    MissingHandicap { participant_id: String },
    #[error("invalid stroke index table: {0}")]
    InvalidStrokeIndexTable(String),
    #[error("{format} needs at least {required} entrants, got {actual}")]
    IncompleteGroupForFormat {
        format: String,
        required: usize,
        actual: usize,
    },
    #[error("{format} supports at most {allowed} players, got {actual}")]
    GroupTooLargeForFormat {
        format: String,
        allowed: usize,
        actual: usize,
    },
    #[error("unknown aggregation method: {0}")]
    UnknownAggregationMethod(String),
    #[error("unknown format type: {0}")]
    UnknownFormatType(String),
    #[error("invalid config for competition {competition_id}: {reason}")]
    InvalidCompetitionConfig {
        competition_id: String,
        reason: String,
    },
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),
    #[error("unknown team: {0}")]
    UnknownTeam(String),
}

impl ScoringError {
    pub(crate) fn incomplete(format: &str, required: usize, actual: usize) -> Self {
        Self::IncompleteGroupForFormat {
            format: format.to_string(),
            required,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
