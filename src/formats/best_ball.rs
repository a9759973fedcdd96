use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::formats::match_play::{HoleWinner, MatchLedger, MatchSide, MatchStatus};
use crate::formats::{FormatInput, PlayerCard};
use crate::model::{FormatType, Team, TeamId, TeamMatchConfig};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamSide {
    pub team_id: TeamId,
    pub team_name: String,
    pub players: Vec<MatchSide>,
}

/// One side of a team match: the team and its in-scope players.
pub(crate) struct TeamCards<'c, 'a> {
    pub team: &'a Team,
    pub cards: Vec<&'c PlayerCard<'a>>,
}

impl TeamCards<'_, '_> {
    pub(crate) fn side(&self) -> TeamSide {
        TeamSide {
            team_id: self.team.id.clone(),
            team_name: self.team.name.clone(),
            players: self
                .cards
                .iter()
                .map(|c| MatchSide {
                    participant_id: c.participant.id.clone(),
                    display_name: c.participant.display_name.clone(),
                    playing_handicap: c.totals.playing_handicap,
                })
                .collect(),
        }
    }

    pub(crate) fn best_net(&self, hole_idx: usize) -> Option<i32> {
        self.cards.iter().filter_map(|c| c.net(hole_idx)).min()
    }

    /// Net scores of the players who have scored the hole, best first.
    pub(crate) fn nets_on(&self, hole_idx: usize) -> Vec<i32> {
        let mut nets: Vec<i32> = self.cards.iter().filter_map(|c| c.net(hole_idx)).collect();
        nets.sort_unstable();
        nets
    }
}

/// Resolve the team pairings of a team match format over the participants in scope.
///
/// Without configured pairings the first two teams in scope play each other. Configured
/// pairings whose teams have nobody in scope are skipped; a side with fewer than
/// `min_players` in scope is an error.
pub(crate) fn team_matchups<'c, 'a>(
    input: &FormatInput<'a>,
    cards: &'c [PlayerCard<'a>],
    config: &TeamMatchConfig,
    format: FormatType,
    min_players: usize,
) -> Result<Vec<(TeamCards<'c, 'a>, TeamCards<'c, 'a>)>> {
    let pairs: Vec<(&'a Team, &'a Team)> = if config.pairings.is_empty() {
        let teams = input.teams_in_scope();
        if teams.len() < 2 {
            return Err(ScoringError::incomplete(format.as_str(), 2, teams.len()));
        }
        vec![(teams[0], teams[1])]
    } else {
        let mut pairs = Vec::new();
        for pairing in &config.pairings {
            pairs.push((input.team(&pairing.team_a)?, input.team(&pairing.team_b)?));
        }
        pairs
    };

    let mut matchups = Vec::with_capacity(pairs.len());
    for (team_a, team_b) in pairs {
        let a = TeamCards {
            team: team_a,
            cards: input.team_members(cards, &team_a.id),
        };
        let b = TeamCards {
            team: team_b,
            cards: input.team_members(cards, &team_b.id),
        };
        if !config.pairings.is_empty() && a.cards.is_empty() && b.cards.is_empty() {
            continue;
        }
        for side in [&a, &b] {
            if side.cards.len() < min_players {
                return Err(ScoringError::incomplete(
                    format.as_str(),
                    min_players,
                    side.cards.len(),
                ));
            }
        }
        matchups.push((a, b));
    }
    Ok(matchups)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BestBallHoleResult {
    pub hole_number: u32,
    pub ball_a: i32,
    pub ball_b: i32,
    pub winner: HoleWinner,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BestBallMatch {
    pub team_a: TeamSide,
    pub team_b: TeamSide,
    pub hole_results: Vec<BestBallHoleResult>,
    #[serde(flatten)]
    pub status: MatchStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BestBallResult {
    pub matches: Vec<BestBallMatch>,
}

impl BestBallResult {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(|m| m.status.is_decided)
    }
}

/// Team ball per hole is the lowest net among the team's players who scored it.
///
/// # Errors
/// `IncompleteGroupForFormat` with fewer than two teams or an empty side, `UnknownTeam` for a
/// pairing naming a team outside the round, and `MissingHandicap`.
pub fn calculate_best_ball(
    input: &FormatInput<'_>,
    config: &TeamMatchConfig,
) -> Result<BestBallResult> {
    let cards = input.player_cards()?;
    let total_holes = input.holes.len();
    let matchups = team_matchups(input, &cards, config, FormatType::BestBall, 1)?;

    let mut matches = Vec::with_capacity(matchups.len());
    for (a, b) in &matchups {
        let mut ledger = MatchLedger::new(total_holes as u32, 1);
        let mut hole_results = Vec::new();
        for (idx, hole) in input.holes.holes().iter().enumerate() {
            if ledger.is_closed() {
                break;
            }
            let (Some(ball_a), Some(ball_b)) = (a.best_net(idx), b.best_net(idx)) else {
                continue;
            };
            let winner = HoleWinner::by_lower(ball_a, ball_b);
            ledger.record(winner.delta());
            hole_results.push(BestBallHoleResult {
                hole_number: hole.hole_number,
                ball_a,
                ball_b,
                winner,
            });
        }
        matches.push(BestBallMatch {
            team_a: a.side(),
            team_b: b.side(),
            hole_results,
            status: ledger.status(config.points_per_win, config.points_per_half),
        });
    }
    Ok(BestBallResult { matches })
}
