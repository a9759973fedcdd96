use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::formats::{FormatInput, PlayerCard};
use crate::model::{FormatType, GroupId, ParticipantId, RumbleConfig, RumbleCounting, TeamId};
use crate::score::sort_utils::competition_ranks;

/// How many of a sub-group's stableford scores count on a hole.
#[must_use]
pub fn scores_counted(counting: RumbleCounting, hole_number: u32, players: usize) -> usize {
    let n = match counting {
        RumbleCounting::BestBall => 1,
        RumbleCounting::Progressive => match hole_number {
            0..=6 => 1,
            7..=12 => 2,
            13..=17 => 3,
            _ => players,
        },
    };
    n.min(players)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RumblePlayerPoints {
    pub participant_id: ParticipantId,
    /// `None` while the player has not scored the hole.
    pub points: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RumbleHoleScore {
    pub hole_number: u32,
    pub player_points: Vec<RumblePlayerPoints>,
    pub count_used: usize,
    pub contribution: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RumbleSubgroupResult {
    pub group_id: Option<GroupId>,
    pub group_number: Option<u32>,
    pub group_name: Option<String>,
    pub hole_scores: Vec<RumbleHoleScore>,
    pub total: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RumbleTeamResult {
    pub team_id: TeamId,
    pub team_name: String,
    pub subgroups: Vec<RumbleSubgroupResult>,
    pub team_total: i32,
    pub rank: u32,
    pub points: f64,
    pub is_winner: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RumbleResult {
    pub teams: Vec<RumbleTeamResult>,
    pub is_complete: bool,
    pub result_text: String,
}

fn score_subgroup(
    input: &FormatInput<'_>,
    members: &[&PlayerCard<'_>],
    counting: RumbleCounting,
) -> (Vec<RumbleHoleScore>, i32) {
    let mut total = 0;
    let hole_scores = input
        .holes
        .holes()
        .iter()
        .enumerate()
        .map(|(idx, hole)| {
            let player_points: Vec<RumblePlayerPoints> = members
                .iter()
                .map(|c| RumblePlayerPoints {
                    participant_id: c.participant.id.clone(),
                    points: c.stableford(idx),
                })
                .collect();

            if player_points.iter().all(|p| p.points.is_none()) {
                return RumbleHoleScore {
                    hole_number: hole.hole_number,
                    player_points,
                    count_used: 0,
                    contribution: 0,
                };
            }

            let count = scores_counted(counting, hole.hole_number, members.len());
            let mut points: Vec<i32> =
                player_points.iter().map(|p| p.points.unwrap_or(0)).collect();
            points.sort_unstable_by(|a, b| b.cmp(a));
            let contribution: i32 = points.iter().take(count).sum();
            total += contribution;
            RumbleHoleScore {
                hole_number: hole.hole_number,
                player_points,
                count_used: count,
                contribution,
            }
        })
        .collect();
    (hole_scores, total)
}

/// Team relay over stableford points, scored per (group, team) sub-group.
///
/// # Errors
/// `IncompleteGroupForFormat` with fewer than two teams in scope, and `MissingHandicap`.
pub fn calculate_rumble(input: &FormatInput<'_>, config: &RumbleConfig) -> Result<RumbleResult> {
    let teams = input.teams_in_scope();
    if teams.len() < 2 {
        return Err(ScoringError::incomplete(
            FormatType::Rumble.as_str(),
            2,
            teams.len(),
        ));
    }
    let cards = input.player_cards()?;
    let groups = input.round.groups_in_order();

    let mut results = Vec::with_capacity(teams.len());
    for team in &teams {
        let members = input.team_members(&cards, &team.id);
        let mut subgroups = Vec::new();

        if groups.is_empty() {
            let (hole_scores, total) = score_subgroup(input, &members, config.counting);
            subgroups.push(RumbleSubgroupResult {
                group_id: None,
                group_number: None,
                group_name: None,
                hole_scores,
                total,
            });
        } else {
            for group in &groups {
                let in_group: Vec<&PlayerCard<'_>> = members
                    .iter()
                    .copied()
                    .filter(|c| c.participant.group_id.as_deref() == Some(group.id.as_str()))
                    .collect();
                if in_group.is_empty() {
                    continue;
                }
                let (hole_scores, total) = score_subgroup(input, &in_group, config.counting);
                subgroups.push(RumbleSubgroupResult {
                    group_id: Some(group.id.clone()),
                    group_number: Some(group.group_number),
                    group_name: group.name.clone(),
                    hole_scores,
                    total,
                });
            }
        }

        results.push(RumbleTeamResult {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            team_total: subgroups.iter().map(|s| s.total).sum(),
            subgroups,
            rank: 0,
            points: 0.0,
            is_winner: false,
        });
    }

    results.sort_by(|a, b| b.team_total.cmp(&a.team_total));
    let ranks = competition_ranks(&results, |a, b| a.team_total == b.team_total);
    for (team, rank) in results.iter_mut().zip(ranks) {
        team.rank = rank;
    }
    let leaders = results.iter().filter(|t| t.rank == 1).count();
    if leaders == 1 {
        results[0].is_winner = true;
        results[0].points = config.points_per_win;
    }

    let result_text = if leaders > 1 {
        let names: Vec<&str> = results
            .iter()
            .filter(|t| t.rank == 1)
            .map(|t| t.team_name.as_str())
            .collect();
        format!("Tied: {} ({} pts each)", names.join(" & "), results[0].team_total)
    } else if results.len() == 2 {
        format!(
            "{} wins {}-{}",
            results[0].team_name, results[0].team_total, results[1].team_total
        )
    } else {
        format!("{} wins {}", results[0].team_name, results[0].team_total)
    };

    let total_holes = input.holes.len() as u32;
    let is_complete = teams
        .iter()
        .flat_map(|t| input.team_members(&cards, &t.id))
        .all(|c| c.totals.holes_completed == total_holes);

    Ok(RumbleResult {
        teams: results,
        is_complete,
        result_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progressive_schedule_by_hole() {
        let counted: Vec<usize> = [1, 6, 7, 12, 13, 17, 18]
            .into_iter()
            .map(|h| scores_counted(RumbleCounting::Progressive, h, 4))
            .collect();
        assert_eq!(counted, vec![1, 1, 2, 2, 3, 3, 4]);
    }

    #[test]
    fn count_never_exceeds_players() {
        assert_eq!(scores_counted(RumbleCounting::Progressive, 15, 2), 2);
        assert_eq!(scores_counted(RumbleCounting::BestBall, 18, 4), 1);
    }
}
