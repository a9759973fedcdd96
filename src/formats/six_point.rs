use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::formats::{FormatInput, PlayerCard};
use crate::model::{FormatType, ParticipantId, SixPointBasis, SixPointConfig};
use crate::score::sort_utils::{competition_ranks, points_then_holes};

/// Points for first, second, third (and fourth) on a hole.
#[must_use]
pub fn six_point_pool(players: usize) -> &'static [f64] {
    match players {
        3 => &[4.0, 2.0, 0.0],
        4 => &[3.0, 2.0, 1.0, 0.0],
        _ => &[],
    }
}

/// Hand out a hole's pool given each player's score, lower being better.
///
/// Players with equal scores split the points of the positions they occupy.
#[must_use]
pub fn distribute_pool(scores: &[i32], pool: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by_key(|&i| scores[i]);

    let mut points = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        let shared: f64 = pool.iter().skip(start).take(end - start).sum();
        let each = shared / (end - start) as f64;
        for &i in &order[start..end] {
            points[i] = each;
        }
        start = end;
    }
    points
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointsAllocation {
    pub participant_id: ParticipantId,
    /// The compared value: net, gross or stableford points depending on the basis.
    pub score: i32,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SixPointHoleResult {
    pub hole_number: u32,
    pub allocations: Vec<PointsAllocation>,
}

/// Leaderboard row shared by the points games (six-point, chair, wolf).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointsEntry {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub points: f64,
    pub holes_completed: u32,
    pub rank: u32,
}

/// Points desc, then holes completed desc, with shared ranks.
pub(crate) fn points_leaderboard(cards: &[PlayerCard<'_>], points: &[f64]) -> Vec<PointsEntry> {
    let mut leaderboard: Vec<PointsEntry> = cards
        .iter()
        .zip(points)
        .map(|(card, &points)| PointsEntry {
            participant_id: card.participant.id.clone(),
            display_name: card.participant.display_name.clone(),
            points,
            holes_completed: card.totals.holes_completed,
            rank: 0,
        })
        .collect();
    leaderboard.sort_by(|a, b| {
        points_then_holes((a.points, a.holes_completed), (b.points, b.holes_completed))
    });
    let ranks = competition_ranks(&leaderboard, |a, b| {
        a.points == b.points && a.holes_completed == b.holes_completed
    });
    for (entry, rank) in leaderboard.iter_mut().zip(ranks) {
        entry.rank = rank;
    }
    leaderboard
}

pub(crate) fn check_group_size(
    format: FormatType,
    actual: usize,
    min: usize,
    max: Option<usize>,
) -> Result<()> {
    if actual < min {
        return Err(ScoringError::incomplete(format.as_str(), min, actual));
    }
    if let Some(allowed) = max.filter(|&m| actual > m) {
        return Err(ScoringError::GroupTooLargeForFormat {
            format: format.to_string(),
            allowed,
            actual,
        });
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SixPointResult {
    pub scoring_basis: SixPointBasis,
    pub holes_played: u32,
    pub total_holes: u32,
    pub is_complete: bool,
    pub hole_results: Vec<SixPointHoleResult>,
    pub leaderboard: Vec<PointsEntry>,
}

/// # Errors
/// `IncompleteGroupForFormat` below three players, `GroupTooLargeForFormat` above four, and
/// `MissingHandicap`.
pub fn calculate_six_point(
    input: &FormatInput<'_>,
    config: &SixPointConfig,
) -> Result<SixPointResult> {
    check_group_size(FormatType::SixPoint, input.participants.len(), 3, Some(4))?;
    let cards = input.player_cards()?;
    let pool = six_point_pool(cards.len());

    let mut totals = vec![0.0; cards.len()];
    let mut hole_results = Vec::new();
    for (idx, hole) in input.holes.holes().iter().enumerate() {
        let scored: Option<Vec<i32>> = cards
            .iter()
            .map(|c| match config.scoring_basis {
                SixPointBasis::Net => c.net(idx),
                SixPointBasis::Gross => c.gross(idx),
                SixPointBasis::Stableford => c.stableford(idx),
            })
            .collect();
        let Some(scores) = scored else {
            continue;
        };
        // higher stableford is better, so rank on the negation
        let ranked: Vec<i32> = match config.scoring_basis {
            SixPointBasis::Stableford => scores.iter().map(|s| -s).collect(),
            SixPointBasis::Net | SixPointBasis::Gross => scores.clone(),
        };
        let points = distribute_pool(&ranked, pool);
        for (total, p) in totals.iter_mut().zip(&points) {
            *total += p;
        }
        hole_results.push(SixPointHoleResult {
            hole_number: hole.hole_number,
            allocations: cards
                .iter()
                .zip(scores.iter().zip(&points))
                .map(|(c, (&score, &points))| PointsAllocation {
                    participant_id: c.participant.id.clone(),
                    score,
                    points,
                })
                .collect(),
        });
    }

    let total_holes = input.holes.len() as u32;
    let holes_played = hole_results.len() as u32;
    Ok(SixPointResult {
        scoring_basis: config.scoring_basis,
        holes_played,
        total_holes,
        is_complete: holes_played == total_holes,
        hole_results,
        leaderboard: points_leaderboard(&cards, &totals),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_ball_splits() {
        let pool = six_point_pool(3);
        assert_eq!(distribute_pool(&[3, 4, 5], pool), vec![4.0, 2.0, 0.0]);
        assert_eq!(distribute_pool(&[4, 4, 5], pool), vec![3.0, 3.0, 0.0]);
        assert_eq!(distribute_pool(&[3, 5, 5], pool), vec![4.0, 1.0, 1.0]);
        assert_eq!(distribute_pool(&[4, 4, 4], pool), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn four_ball_always_hands_out_six() {
        let pool = six_point_pool(4);
        for scores in [[3, 4, 5, 6], [4, 4, 5, 5], [5, 3, 3, 3], [4, 4, 4, 4]] {
            let total: f64 = distribute_pool(&scores, pool).iter().sum();
            assert!((total - 6.0).abs() < f64::EPSILON);
        }
        assert_eq!(distribute_pool(&[5, 3, 3, 3], pool), vec![0.0, 2.0, 2.0, 2.0]);
    }
}
