use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::FormatInput;
use crate::formats::six_point::{PointsEntry, check_group_size, points_leaderboard};
use crate::model::{FormatType, ParticipantId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChairHoleResult {
    pub hole_number: u32,
    /// Set when a player won the hole outright and so holds the chair now.
    pub taken_by: Option<ParticipantId>,
    /// Holder after the hole; `None` while the chair is still empty.
    pub holder: Option<ParticipantId>,
    pub point_awarded: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChairResult {
    pub current_holder: Option<ParticipantId>,
    pub holes_played: u32,
    pub total_holes: u32,
    pub is_complete: bool,
    pub hole_results: Vec<ChairHoleResult>,
    pub leaderboard: Vec<PointsEntry>,
}

/// # Errors
/// `IncompleteGroupForFormat` below two players, and `MissingHandicap`.
pub fn calculate_chair(input: &FormatInput<'_>) -> Result<ChairResult> {
    check_group_size(FormatType::Chair, input.participants.len(), 2, None)?;
    let cards = input.player_cards()?;

    let mut points = vec![0.0; cards.len()];
    let mut holder: Option<usize> = None;
    let mut hole_results = Vec::new();

    for (idx, hole) in input.holes.holes().iter().enumerate() {
        let Some(nets) = cards.iter().map(|c| c.net(idx)).collect::<Option<Vec<i32>>>() else {
            continue;
        };
        let Some(&best) = nets.iter().min() else {
            continue;
        };
        let mut leaders = nets.iter().enumerate().filter(|&(_, &n)| n == best);
        let outright = match (leaders.next(), leaders.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        };
        if outright.is_some() {
            holder = outright;
        }
        if let Some(h) = holder {
            points[h] += 1.0;
        }
        hole_results.push(ChairHoleResult {
            hole_number: hole.hole_number,
            taken_by: outright.map(|i| cards[i].participant.id.clone()),
            holder: holder.map(|i| cards[i].participant.id.clone()),
            point_awarded: holder.is_some(),
        });
    }

    let total_holes = input.holes.len() as u32;
    let holes_played = hole_results.len() as u32;
    Ok(ChairResult {
        current_holder: holder.map(|i| cards[i].participant.id.clone()),
        holes_played,
        total_holes,
        is_complete: holes_played == total_holes,
        hole_results,
        leaderboard: points_leaderboard(&cards, &points),
    })
}
