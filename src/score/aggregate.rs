use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::handicap::{HoleTable, playing_handicap, resolve_effective_handicap};
use crate::model::{Participant, ParticipantId, Scorecard};

/// Standard stableford: net double bogey or worse 0, bogey 1, par 2, birdie 3 and so on.
#[must_use]
pub fn stableford_points(gross_strokes: i32, par: i32, strokes_received: i32) -> i32 {
    let net = gross_strokes.saturating_sub(strokes_received);
    (2 + par).saturating_sub(net).max(0)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleScore {
    pub hole_number: u32,
    pub par: i32,
    pub stroke_index: u32,
    pub gross_strokes: Option<i32>,
    pub strokes_received: i32,
    pub net_strokes: Option<i32>,
    pub stableford: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParticipantTotals {
    pub participant_id: ParticipantId,
    pub playing_handicap: i32,
    pub gross_strokes: i32,
    pub net_strokes: i32,
    pub holes_completed: u32,
    /// Gross minus par over completed holes only.
    pub relative_to_par: i32,
    pub stableford_points: i32,
    pub hole_scores: Vec<HoleScore>,
}

impl ParticipantTotals {
    #[must_use]
    pub fn par_of_completed(&self) -> i32 {
        self.hole_scores
            .iter()
            .filter(|h| h.gross_strokes.is_some())
            .map(|h| h.par)
            .sum()
    }
}

/// Reduce one participant's scorecard to totals. Unscored holes contribute nothing.
///
/// # Errors
/// `MissingHandicap` when the participant's handicap cannot be resolved.
pub fn aggregate_participant(
    participant: &Participant,
    holes: &HoleTable,
    scorecard: &Scorecard,
) -> Result<ParticipantTotals> {
    let ph = playing_handicap(resolve_effective_handicap(participant)?);

    let mut totals = ParticipantTotals {
        participant_id: participant.id.clone(),
        playing_handicap: ph,
        gross_strokes: 0,
        net_strokes: 0,
        holes_completed: 0,
        relative_to_par: 0,
        stableford_points: 0,
        hole_scores: Vec::with_capacity(holes.len()),
    };

    for hole in holes.holes() {
        let strokes_received = holes.strokes_received(ph, hole);
        let gross = scorecard.strokes(&participant.id, hole.hole_number);
        let mut score = HoleScore {
            hole_number: hole.hole_number,
            par: hole.par,
            stroke_index: hole.stroke_index,
            gross_strokes: gross,
            strokes_received,
            net_strokes: None,
            stableford: 0,
        };
        if let Some(gross) = gross {
            let net = gross.saturating_sub(strokes_received);
            score.net_strokes = Some(net);
            score.stableford = stableford_points(gross, hole.par, strokes_received);
            totals.gross_strokes += gross;
            totals.net_strokes = totals.net_strokes.saturating_add(net);
            totals.relative_to_par += gross - hole.par;
            totals.stableford_points += score.stableford;
            totals.holes_completed += 1;
        }
        totals.hole_scores.push(score);
    }

    Ok(totals)
}
