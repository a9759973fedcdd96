use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::FormatInput;
use crate::model::ParticipantId;
use crate::score::aggregate::HoleScore;
use crate::score::sort_utils::{competition_ranks, points_then_holes};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StablefordEntry {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub playing_handicap: i32,
    pub points: i32,
    pub holes_completed: u32,
    pub gross_strokes: i32,
    pub net_strokes: i32,
    pub rank: u32,
    pub hole_scores: Vec<HoleScore>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StablefordResult {
    pub total_holes: u32,
    pub is_complete: bool,
    pub leaderboard: Vec<StablefordEntry>,
}

/// Points desc, then holes completed desc; anything still equal shares a rank.
///
/// # Errors
/// `MissingHandicap` for any in-scope participant.
pub fn calculate_stableford(input: &FormatInput<'_>) -> Result<StablefordResult> {
    let total_holes = input.holes.len() as u32;
    let mut leaderboard: Vec<StablefordEntry> = input
        .player_cards()?
        .into_iter()
        .map(|card| StablefordEntry {
            participant_id: card.participant.id.clone(),
            display_name: card.participant.display_name.clone(),
            playing_handicap: card.totals.playing_handicap,
            points: card.totals.stableford_points,
            holes_completed: card.totals.holes_completed,
            gross_strokes: card.totals.gross_strokes,
            net_strokes: card.totals.net_strokes,
            rank: 0,
            hole_scores: card.totals.hole_scores,
        })
        .collect();

    leaderboard.sort_by(|a, b| {
        points_then_holes(
            (f64::from(a.points), a.holes_completed),
            (f64::from(b.points), b.holes_completed),
        )
    });
    let ranks = competition_ranks(&leaderboard, |a, b| {
        a.points == b.points && a.holes_completed == b.holes_completed
    });
    for (entry, rank) in leaderboard.iter_mut().zip(ranks) {
        entry.rank = rank;
    }

    let is_complete = leaderboard.iter().all(|e| e.holes_completed == total_holes);
    Ok(StablefordResult {
        total_holes,
        is_complete,
        leaderboard,
    })
}
