use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::FormatInput;
use crate::formats::six_point::{PointsEntry, check_group_size, points_leaderboard};
use crate::model::{FormatType, GameDecision, ParticipantId, WolfConfig};

/// Rotation position (0-based) of the wolf on a hole.
#[must_use]
pub fn wolf_index_for_hole(hole_number: u32, players: usize) -> usize {
    if players == 0 {
        return 0;
    }
    (hole_number.saturating_sub(1) as usize) % players
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WolfOutcome {
    WolfWins,
    WolfLoses,
    Tie,
    /// Declared, but somebody has not scored the hole yet.
    AwaitingScores,
    /// No valid decision for the hole.
    NotDeclared,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfPoints {
    pub participant_id: ParticipantId,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfHoleResult {
    pub hole_number: u32,
    pub wolf_player_id: ParticipantId,
    pub partner_player_id: Option<ParticipantId>,
    pub is_lone_wolf: bool,
    pub wolf_side_best: Option<i32>,
    pub opposing_side_best: Option<i32>,
    pub outcome: WolfOutcome,
    pub points_awarded: Vec<WolfPoints>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfResult {
    /// Rotation order; the player at position `i` is wolf on holes `i + 1`, `i + 1 + n`, ...
    pub rotation: Vec<ParticipantId>,
    pub holes_played: u32,
    pub total_holes: u32,
    pub is_complete: bool,
    pub hole_results: Vec<WolfHoleResult>,
    pub leaderboard: Vec<PointsEntry>,
}

/// The wolf's side for a hole: `None` partner index means lone wolf.
#[derive(Clone, Copy, Debug)]
struct WolfSide {
    wolf: usize,
    partner: Option<usize>,
}

/// Check the latest decision for a hole against the rotation and current membership.
fn validate_decision(
    decision: Option<&GameDecision>,
    input: &FormatInput<'_>,
    hole_number: u32,
    wolf: usize,
) -> Option<WolfSide> {
    let Some(decision) = decision else {
        debug!(
            "wolf competition {} hole {hole_number}: no decision yet",
            input.competition.id
        );
        return None;
    };
    let wolf_id = &input.participants[wolf].id;
    if &decision.wolf_player_id != wolf_id {
        warn!(
            "wolf competition {} hole {hole_number}: decision names {} as wolf, rotation says {}",
            input.competition.id, decision.wolf_player_id, wolf_id
        );
        return None;
    }
    let partner = match &decision.partner_player_id {
        None => None,
        Some(partner_id) => {
            let found = input
                .participants
                .iter()
                .position(|p| &p.id == partner_id)
                .filter(|&i| i != wolf);
            if found.is_none() {
                warn!(
                    "wolf competition {} hole {hole_number}: partner {partner_id} not in group",
                    input.competition.id
                );
                return None;
            }
            found
        }
    };
    if partner.is_some() && input.participants.len() < 3 {
        warn!(
            "wolf competition {} hole {hole_number}: a partnered wolf has no opponents",
            input.competition.id
        );
        return None;
    }
    Some(WolfSide { wolf, partner })
}

/// # Errors
/// `IncompleteGroupForFormat` below two players, and `MissingHandicap`.
pub fn calculate_wolf(input: &FormatInput<'_>, config: &WolfConfig) -> Result<WolfResult> {
    let n = input.participants.len();
    check_group_size(FormatType::Wolf, n, 2, None)?;
    let cards = input.player_cards()?;

    // latest decision per hole for this competition and round
    let mut decisions: AHashMap<u32, &GameDecision> = AHashMap::new();
    for decision in &input.round.game_decisions {
        if decision.competition_id != input.competition.id {
            continue;
        }
        if decision
            .round_id
            .as_deref()
            .is_some_and(|r| r != input.round.id)
        {
            continue;
        }
        decisions.insert(decision.hole_number, decision);
    }

    let mut points = vec![0.0; n];
    let mut hole_results = Vec::with_capacity(input.holes.len());
    let mut holes_played = 0;

    for (idx, hole) in input.holes.holes().iter().enumerate() {
        let wolf = wolf_index_for_hole(hole.hole_number, n);
        let mut result = WolfHoleResult {
            hole_number: hole.hole_number,
            wolf_player_id: input.participants[wolf].id.clone(),
            partner_player_id: None,
            is_lone_wolf: false,
            wolf_side_best: None,
            opposing_side_best: None,
            outcome: WolfOutcome::NotDeclared,
            points_awarded: Vec::new(),
        };

        let decision = decisions.get(&hole.hole_number).copied();
        let Some(side) = validate_decision(decision, input, hole.hole_number, wolf) else {
            hole_results.push(result);
            continue;
        };
        result.partner_player_id = side.partner.map(|i| input.participants[i].id.clone());
        result.is_lone_wolf = side.partner.is_none();

        let Some(nets) = cards.iter().map(|c| c.net(idx)).collect::<Option<Vec<i32>>>() else {
            result.outcome = WolfOutcome::AwaitingScores;
            hole_results.push(result);
            continue;
        };
        holes_played += 1;

        let on_wolf_side = |i: usize| i == side.wolf || Some(i) == side.partner;
        let wolf_best = (0..n).filter(|&i| on_wolf_side(i)).map(|i| nets[i]).min();
        let opposing_best = (0..n).filter(|&i| !on_wolf_side(i)).map(|i| nets[i]).min();
        result.wolf_side_best = wolf_best;
        result.opposing_side_best = opposing_best;

        let (Some(wolf_best), Some(opposing_best)) = (wolf_best, opposing_best) else {
            hole_results.push(result);
            continue;
        };

        let mut award = |i: usize, p: f64| {
            points[i] += p;
            result.points_awarded.push(WolfPoints {
                participant_id: input.participants[i].id.clone(),
                points: p,
            });
        };
        if wolf_best < opposing_best {
            match side.partner {
                Some(partner) => {
                    award(side.wolf, config.partner_win_points);
                    award(partner, config.partner_win_points);
                }
                None => award(side.wolf, config.lone_win_points),
            }
            result.outcome = WolfOutcome::WolfWins;
        } else if wolf_best > opposing_best {
            for i in (0..n).filter(|&i| !on_wolf_side(i)) {
                award(i, config.opponent_win_points);
            }
            result.outcome = WolfOutcome::WolfLoses;
        } else {
            result.outcome = WolfOutcome::Tie;
        }
        hole_results.push(result);
    }

    let total_holes = input.holes.len() as u32;
    Ok(WolfResult {
        rotation: input.participants.iter().map(|p| p.id.clone()).collect(),
        holes_played,
        total_holes,
        is_complete: holes_played == total_holes,
        hole_results,
        leaderboard: points_leaderboard(&cards, &points),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_every_n_holes() {
        let wolves: Vec<usize> = (1..=9).map(|h| wolf_index_for_hole(h, 4)).collect();
        assert_eq!(wolves, vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert_eq!(wolf_index_for_hole(4, 3), 0);
    }
}
