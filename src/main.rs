use log::info;
use rusty_golf_comps::args::{self, Mode};
use rusty_golf_comps::{build_round_results, compute_standing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = args::args_checks()?;

    let output = match &args.mode {
        Mode::Round(round) => {
            info!("scoring round {}", round.id);
            let results = build_round_results(round)?;
            to_json(&results, args.pretty)?
        }
        Mode::Standing { standing, snapshot } => {
            info!(
                "computing standing {} over {} rounds",
                standing.id,
                snapshot.rounds.len()
            );
            let result = compute_standing(standing, &snapshot.rounds)?;
            to_json(&result, args.pretty)?
        }
    };
    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
