use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::model::{Round, StandingConfig, TournamentSnapshot};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Pretty-print the result json.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score one round: the individual scoreboard plus every competition result.
    Round {
        /// A serialized round snapshot.
        #[arg(
            short = 'i',
            long,
            value_name = "ROUND_JSON",
            value_parser = crate::args::validation::check_readable_file_and_json
        )]
        input: Value,
    },
    /// Compute one tournament standing over the finalized rounds.
    Standing {
        /// A serialized tournament snapshot with `standings` and `rounds`.
        #[arg(
            short = 'i',
            long,
            value_name = "TOURNAMENT_JSON",
            value_parser = crate::args::validation::check_readable_file_and_json
        )]
        input: Value,
        #[arg(short = 's', long, value_name = "STANDING_ID")]
        standing_id: String,
    },
}

#[derive(Debug, Clone)]
pub enum Mode {
    Round(Box<Round>),
    Standing {
        standing: StandingConfig,
        snapshot: TournamentSnapshot,
    },
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub mode: Mode,
    pub pretty: bool,
}
