use clap::Parser;
use rusty_golf_comps::args::{Args, CleanArgs, Mode};
use rusty_golf_comps::model::{FormatType, Round, RoundStatus, TournamentSnapshot};
use rusty_golf_comps::{RoundResults, build_round_results, compute_standing};
use serde_json::Value;

const ROUND_JSON: &str = include_str!("fixtures/round.json");
const TOURNAMENT_JSON: &str = include_str!("fixtures/tournament.json");

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test8_fixture_round_resolves() -> Result<(), Box<dyn std::error::Error>> {
    let round: Round = serde_json::from_str(ROUND_JSON)?;
    assert_eq!(round.status, RoundStatus::Open);
    assert_eq!(round.holes.len(), 9);
    assert_eq!(round.scorecard.strokes("r1-dan", 4), Some(4));

    let results = build_round_results(&round)?;
    assert_eq!(results.scoreboard.total_holes, 9);
    assert_eq!(results.scoreboard.rows.len(), 4);
    assert!(results.scoreboard.has_contributor_bonuses);
    let cat = results
        .scoreboard
        .rows
        .iter()
        .find(|r| r.person_id == "cat")
        .ok_or("cat missing")?;
    assert_eq!(cat.contributor_bonus_total, 1);
    assert_eq!(cat.team_id.as_deref(), Some("late"));

    let formats: Vec<FormatType> = results.competitions.iter().map(|c| c.format_type).collect();
    assert_eq!(
        formats,
        vec![
            FormatType::Stableford,
            FormatType::SixPoint,
            FormatType::Wolf,
            FormatType::BestBall,
            FormatType::NearestPin,
        ]
    );
    Ok(())
}

#[test]
fn test8_result_json_shape() -> Result<(), Box<dyn std::error::Error>> {
    let round: Round = serde_json::from_str(ROUND_JSON)?;
    let results = build_round_results(&round)?;
    let json = serde_json::to_value(&results)?;

    let competitions = json["competitions"].as_array().ok_or("no competitions")?;
    assert_eq!(competitions[0]["scope"], "round");
    assert_eq!(competitions[0]["format_type"], "stableford");
    assert_eq!(competitions[0]["result"]["type"], "stableford");
    assert!(competitions[0]["result"]["result"]["leaderboard"].is_array());

    assert_eq!(competitions[1]["scope"], "within_group");
    let groups = competitions[1]["groups"].as_array().ok_or("no groups")?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["group_id"], "g1");
    assert_eq!(groups[0]["group_name"], "Morning Four");
    assert_eq!(groups[0]["result"]["type"], "six_point");

    // match status is flattened into each match
    let best_ball = &competitions[3]["result"]["result"]["matches"][0];
    assert!(best_ball["result_text"].is_string());
    assert!(best_ball["team_a"]["players"].is_array());
    assert_eq!(competitions[4]["result"]["result"]["badge"], "NTP H3");

    assert!(json["failed_competitions"].as_array().is_some_and(Vec::is_empty));

    let back: RoundResults = serde_json::from_value(json)?;
    assert_eq!(back, results);
    Ok(())
}

#[test]
fn test8_cli_round_mode() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse_from([
        "rusty-golf-comps",
        "round",
        "-i",
        fixture_path("round.json").as_str(),
        "--pretty",
    ])?;
    let clean = CleanArgs::new(args)?;
    assert!(clean.pretty);
    let Mode::Round(round) = clean.mode else {
        panic!("expected round mode");
    };
    assert_eq!(round.id, "r1");
    Ok(())
}

#[test]
fn test8_cli_rejects_bad_input() {
    let missing = Args::try_parse_from(["rusty-golf-comps", "round", "-i", "/no/such/round.json"]);
    assert!(missing.is_err());

    let args = Args::try_parse_from([
        "rusty-golf-comps",
        "standing",
        "-i",
        fixture_path("tournament.json").as_str(),
        "-s",
        "nope",
    ]);
    let err = args.map_err(|e| e.to_string()).and_then(CleanArgs::new);
    assert!(err.is_err_and(|e| e.contains("nope")));
}

#[test]
fn test8_cli_standing_mode() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse_from([
        "rusty-golf-comps",
        "standing",
        "--input",
        fixture_path("tournament.json").as_str(),
        "--standing-id",
        "oom",
    ])?;
    let Mode::Standing { standing, snapshot } = CleanArgs::new(args)?.mode else {
        panic!("expected standing mode");
    };
    assert_eq!(standing.name, "Order of Merit");

    let result = compute_standing(&standing, &snapshot.rounds)?;
    let rounds: Vec<&str> = result.rounds.iter().map(|r| r.round_id.as_str()).collect();
    assert_eq!(rounds, vec!["t-r1", "t-r2"]);
    assert_eq!(result.leaderboard.len(), 4);
    assert!(result.leaderboard.iter().all(|e| e.rounds_played == 2));
    assert!(
        result
            .leaderboard
            .windows(2)
            .all(|w| w[0].total >= w[1].total)
    );
    Ok(())
}

#[test]
fn test8_team_cup_from_fixture() -> Result<(), Box<dyn std::error::Error>> {
    let snapshot: TournamentSnapshot = serde_json::from_str(TOURNAMENT_JSON)?;
    let cup = snapshot
        .standings
        .iter()
        .find(|s| s.id == "cup")
        .ok_or("cup missing")?;
    let result = compute_standing(cup, &snapshot.rounds)?;
    let teams: Vec<&str> = {
        let mut ids: Vec<&str> = result.leaderboard.iter().map(|e| e.entity_id.as_str()).collect();
        ids.sort_unstable();
        ids
    };
    assert_eq!(teams, vec!["early", "late"]);
    let json: Value = serde_json::to_value(&result)?;
    assert_eq!(json["sort_direction"], "desc");
    assert_eq!(json["participant_type"], "team");
    Ok(())
}
