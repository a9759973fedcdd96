use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::FormatInput;
use crate::formats::best_ball::{TeamSide, team_matchups};
use crate::formats::match_play::{HoleWinner, MatchLedger, MatchStatus};
use crate::model::{FormatType, TeamMatchConfig};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HiLoHoleResult {
    pub hole_number: u32,
    pub low_a: i32,
    pub low_b: i32,
    pub high_a: i32,
    pub high_b: i32,
    pub low_winner: HoleWinner,
    pub high_winner: HoleWinner,
    /// Net movement of the ledger on this hole, from side A's point of view.
    pub swing: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HiLoMatch {
    pub team_a: TeamSide,
    pub team_b: TeamSide,
    pub hole_results: Vec<HiLoHoleResult>,
    #[serde(flatten)]
    pub status: MatchStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HiLoResult {
    pub matches: Vec<HiLoMatch>,
}

impl HiLoResult {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(|m| m.status.is_decided)
    }
}

/// Low ball against low ball and high ball against high ball, both feeding one ledger.
///
/// A hole counts once every player on both sides has scored it. Each hole can move the ledger
/// by two, so the match closes when the lead exceeds twice the holes left.
///
/// # Errors
/// `IncompleteGroupForFormat` unless each side has at least two players in scope, `UnknownTeam`,
/// and `MissingHandicap`.
pub fn calculate_hi_lo(input: &FormatInput<'_>, config: &TeamMatchConfig) -> Result<HiLoResult> {
    let cards = input.player_cards()?;
    let total_holes = input.holes.len();
    let matchups = team_matchups(input, &cards, config, FormatType::HiLo, 2)?;

    let mut matches = Vec::with_capacity(matchups.len());
    for (a, b) in &matchups {
        let mut ledger = MatchLedger::new(total_holes as u32, 2);
        let mut hole_results = Vec::new();
        for (idx, hole) in input.holes.holes().iter().enumerate() {
            if ledger.is_closed() {
                break;
            }
            let nets_a = a.nets_on(idx);
            let nets_b = b.nets_on(idx);
            if nets_a.len() < a.cards.len() || nets_b.len() < b.cards.len() {
                continue;
            }
            let (low_a, high_a) = (nets_a[0], nets_a[1]);
            let (low_b, high_b) = (nets_b[0], nets_b[1]);
            let low_winner = HoleWinner::by_lower(low_a, low_b);
            let high_winner = HoleWinner::by_lower(high_a, high_b);
            let swing = low_winner.delta() + high_winner.delta();
            ledger.record(swing);
            hole_results.push(HiLoHoleResult {
                hole_number: hole.hole_number,
                low_a,
                low_b,
                high_a,
                high_b,
                low_winner,
                high_winner,
                swing,
            });
        }
        matches.push(HiLoMatch {
            team_a: a.side(),
            team_b: b.side(),
            hole_results,
            status: ledger.status(config.points_per_win, config.points_per_half),
        });
    }
    Ok(HiLoResult { matches })
}
