use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::FormatInput;
use crate::model::{ParticipantId, StrokeBasis, StrokePlayConfig};
use crate::score::aggregate::HoleScore;
use crate::score::sort_utils::competition_ranks;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StrokePlayEntry {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub playing_handicap: i32,
    pub gross_strokes: i32,
    pub net_strokes: i32,
    /// Gross or net total, whichever the competition scores on.
    pub ranking_score: i32,
    /// `ranking_score` minus the par of completed holes.
    pub relative_to_par: i32,
    pub holes_completed: u32,
    /// `None` until the participant has completed a hole.
    pub rank: Option<u32>,
    pub hole_scores: Vec<HoleScore>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StrokePlayResult {
    pub scoring_basis: StrokeBasis,
    pub total_holes: u32,
    pub is_complete: bool,
    pub leaderboard: Vec<StrokePlayEntry>,
}

/// # Errors
/// `MissingHandicap` for any in-scope participant.
pub fn calculate_stroke_play(
    input: &FormatInput<'_>,
    config: &StrokePlayConfig,
) -> Result<StrokePlayResult> {
    let total_holes = input.holes.len() as u32;
    let mut leaderboard: Vec<StrokePlayEntry> = input
        .player_cards()?
        .into_iter()
        .map(|card| {
            let totals = card.totals;
            let ranking_score = match config.scoring_basis {
                StrokeBasis::NetStrokes => totals.net_strokes,
                StrokeBasis::GrossStrokes => totals.gross_strokes,
            };
            StrokePlayEntry {
                participant_id: card.participant.id.clone(),
                display_name: card.participant.display_name.clone(),
                playing_handicap: totals.playing_handicap,
                gross_strokes: totals.gross_strokes,
                net_strokes: totals.net_strokes,
                ranking_score,
                relative_to_par: ranking_score - totals.par_of_completed(),
                holes_completed: totals.holes_completed,
                rank: None,
                hole_scores: totals.hole_scores,
            }
        })
        .collect();

    // players without a score sink to the bottom, lowest total first above them
    leaderboard.sort_by_key(|e| (e.holes_completed == 0, e.ranking_score));

    let started = leaderboard.iter().filter(|e| e.holes_completed > 0).count();
    let ranks = competition_ranks(&leaderboard[..started], |a, b| {
        a.ranking_score == b.ranking_score
    });
    for (entry, rank) in leaderboard.iter_mut().zip(ranks) {
        entry.rank = Some(rank);
    }

    let is_complete = leaderboard.iter().all(|e| e.holes_completed == total_holes);
    Ok(StrokePlayResult {
        scoring_basis: config.scoring_basis,
        total_holes,
        is_complete,
        leaderboard,
    })
}
