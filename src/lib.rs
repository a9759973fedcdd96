pub mod args;
pub mod error;
pub mod formats;
pub mod handicap;
pub mod model;
pub mod score;
pub mod standings;

pub use error::{Result, ScoringError};
pub use formats::{CompetitionOutcome, CompetitionResult, ScopedResult};
pub use score::scoreboard::{
    CompetitionFailure, IndividualScoreboard, RoundResults, build_individual_scoreboard,
    build_round_results,
};
pub use standings::{StandingResult, compute_standing};
