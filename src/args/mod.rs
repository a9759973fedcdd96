use clap::Parser;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, Command, Mode};

/// # Errors
///
/// Will return `Err` if the input json does not deserialize or the standing id is unknown
pub fn args_checks() -> Result<CleanArgs, String> {
    CleanArgs::new(Args::parse())
}

impl CleanArgs {
    /// # Errors
    ///
    /// Will return `Err` if the input json does not deserialize or the standing id is unknown
    pub fn new(args: Args) -> Result<Self, String> {
        let mode = match args.command {
            Command::Round { input } => {
                let round = serde_json::from_value(input)
                    .map_err(|e| format!("The input is not a valid round: {e}"))?;
                Mode::Round(Box::new(round))
            }
            Command::Standing { input, standing_id } => {
                let snapshot: crate::model::TournamentSnapshot = serde_json::from_value(input)
                    .map_err(|e| format!("The input is not a valid tournament: {e}"))?;
                let standing = snapshot
                    .standings
                    .iter()
                    .find(|s| s.id == standing_id)
                    .cloned()
                    .ok_or_else(|| format!("No standing with id '{standing_id}' in the input."))?;
                Mode::Standing { standing, snapshot }
            }
        };
        Ok(CleanArgs {
            mode,
            pretty: args.pretty,
        })
    }
}
