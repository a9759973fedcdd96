use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Result, ScoringError};
use crate::formats::{FormatInput, PlayerCard};
use crate::model::{FormatType, MatchPlayConfig, ParticipantId, PlayerPairing};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoleWinner {
    A,
    B,
    Halved,
}

impl HoleWinner {
    /// Lower score wins the hole.
    #[must_use]
    pub fn by_lower(a: i32, b: i32) -> Self {
        match a.cmp(&b) {
            Ordering::Less => HoleWinner::A,
            Ordering::Greater => HoleWinner::B,
            Ordering::Equal => HoleWinner::Halved,
        }
    }

    #[must_use]
    pub fn delta(self) -> i32 {
        match self {
            HoleWinner::A => 1,
            HoleWinner::B => -1,
            HoleWinner::Halved => 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    A,
    B,
    Halved,
}

/// Where a head-to-head match stands. Positive `holes_up` means side A leads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchStatus {
    pub holes_up: i32,
    pub holes_completed: u32,
    pub holes_remaining: u32,
    pub total_holes: u32,
    pub is_decided: bool,
    pub winner: Option<MatchWinner>,
    pub result_text: String,
    pub points_a: f64,
    pub points_b: f64,
}

/// Running holes-up ledger with early termination.
///
/// A hole moves the ledger by at most `swing`; the match is over once the leader cannot be
/// caught in the holes left. Holes recorded after that are ignored.
#[derive(Clone, Debug)]
pub(crate) struct MatchLedger {
    total_holes: u32,
    swing: i32,
    holes_up: i32,
    holes_completed: u32,
    decided_early: bool,
}

impl MatchLedger {
    pub(crate) fn new(total_holes: u32, swing: i32) -> Self {
        Self {
            total_holes,
            swing,
            holes_up: 0,
            holes_completed: 0,
            decided_early: false,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.decided_early
    }

    fn holes_remaining(&self) -> u32 {
        self.total_holes.saturating_sub(self.holes_completed)
    }

    /// Returns false when the match was already decided and the hole was not counted.
    pub(crate) fn record(&mut self, delta: i32) -> bool {
        if self.decided_early {
            return false;
        }
        self.holes_up += delta;
        self.holes_completed += 1;
        let remaining = self.holes_remaining() as i32;
        if self.holes_up.abs() > remaining * self.swing {
            self.decided_early = true;
        }
        true
    }

    pub(crate) fn status(&self, points_per_win: f64, points_per_half: f64) -> MatchStatus {
        let remaining = self.holes_remaining();
        let is_decided = self.decided_early || remaining == 0;
        let lead = self.holes_up.abs();

        let result_text = if self.holes_up == 0 {
            "AS".to_string()
        } else if self.decided_early && remaining > 0 {
            format!("{lead}&{remaining}")
        } else {
            format!("{lead} up")
        };

        let (winner, points_a, points_b) = if !is_decided {
            (None, 0.0, 0.0)
        } else {
            match self.holes_up.cmp(&0) {
                Ordering::Greater => (Some(MatchWinner::A), points_per_win, 0.0),
                Ordering::Less => (Some(MatchWinner::B), 0.0, points_per_win),
                Ordering::Equal => (Some(MatchWinner::Halved), points_per_half, points_per_half),
            }
        };

        MatchStatus {
            holes_up: self.holes_up,
            holes_completed: self.holes_completed,
            holes_remaining: remaining,
            total_holes: self.total_holes,
            is_decided,
            winner,
            result_text,
            points_a,
            points_b,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MatchSide {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub playing_handicap: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MatchHoleResult {
    pub hole_number: u32,
    pub net_a: i32,
    pub net_b: i32,
    pub winner: HoleWinner,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchResult {
    pub player_a: MatchSide,
    pub player_b: MatchSide,
    pub hole_results: Vec<MatchHoleResult>,
    #[serde(flatten)]
    pub status: MatchStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlayResult {
    pub matches: Vec<MatchResult>,
}

impl MatchPlayResult {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(|m| m.status.is_decided)
    }
}

fn side(card: &PlayerCard<'_>) -> MatchSide {
    MatchSide {
        participant_id: card.participant.id.clone(),
        display_name: card.participant.display_name.clone(),
        playing_handicap: card.totals.playing_handicap,
    }
}

/// Play one singles match hole by hole on net strokes.
pub(crate) fn play_match(
    a: &PlayerCard<'_>,
    b: &PlayerCard<'_>,
    total_holes: usize,
    config: &MatchPlayConfig,
) -> MatchResult {
    let mut ledger = MatchLedger::new(total_holes as u32, 1);
    let mut hole_results = Vec::new();

    for idx in 0..total_holes {
        if ledger.is_closed() {
            break;
        }
        let (Some(net_a), Some(net_b)) = (a.net(idx), b.net(idx)) else {
            continue;
        };
        let winner = HoleWinner::by_lower(net_a, net_b);
        ledger.record(winner.delta());
        hole_results.push(MatchHoleResult {
            hole_number: a.totals.hole_scores[idx].hole_number,
            net_a,
            net_b,
            winner,
        });
    }

    MatchResult {
        player_a: side(a),
        player_b: side(b),
        hole_results,
        status: ledger.status(config.points_per_win, config.points_per_half),
    }
}

/// Pairings that apply to the participants in scope.
///
/// With no configured pairings, exactly two players in scope play each other.
fn pairings_in_scope(
    input: &FormatInput<'_>,
    config: &MatchPlayConfig,
) -> Result<Vec<PlayerPairing>> {
    let n = input.participants.len();
    if config.pairings.is_empty() {
        return match n {
            2 => Ok(vec![PlayerPairing {
                player_a: input.participants[0].id.clone(),
                player_b: input.participants[1].id.clone(),
            }]),
            0 | 1 => Err(ScoringError::incomplete(FormatType::MatchPlay.as_str(), 2, n)),
            _ => Err(ScoringError::GroupTooLargeForFormat {
                format: FormatType::MatchPlay.to_string(),
                allowed: 2,
                actual: n,
            }),
        };
    }

    let mut pairings = Vec::new();
    for pairing in &config.pairings {
        for id in [&pairing.player_a, &pairing.player_b] {
            if input.round.participant(id).is_none() {
                return Err(ScoringError::UnknownParticipant(id.clone()));
            }
        }
        let in_scope = |id: &str| input.participants.iter().any(|p| p.id == id);
        if in_scope(&pairing.player_a) && in_scope(&pairing.player_b) {
            pairings.push(pairing.clone());
        }
    }
    Ok(pairings)
}

/// # Errors
/// `UnknownParticipant` for a pairing naming a player outside the round, group-size errors when
/// no pairing is configured and the scope does not hold exactly two players, and
/// `MissingHandicap`.
pub fn calculate_match_play(
    input: &FormatInput<'_>,
    config: &MatchPlayConfig,
) -> Result<MatchPlayResult> {
    let pairings = pairings_in_scope(input, config)?;
    let cards = input.player_cards()?;
    let by_id: AHashMap<&str, &PlayerCard<'_>> = cards.iter().map(|c| (c.id(), c)).collect();

    let mut matches = Vec::with_capacity(pairings.len());
    for pairing in &pairings {
        let a = by_id
            .get(pairing.player_a.as_str())
            .ok_or_else(|| ScoringError::UnknownParticipant(pairing.player_a.clone()))?;
        let b = by_id
            .get(pairing.player_b.as_str())
            .ok_or_else(|| ScoringError::UnknownParticipant(pairing.player_b.clone()))?;
        matches.push(play_match(a, b, input.holes.len(), config));
    }
    Ok(MatchPlayResult { matches })
}
