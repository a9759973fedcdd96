use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::formats::{CompetitionOutcome, bonus_badge, current_award, resolve_competition};
use crate::handicap::HoleTable;
use crate::model::{
    BonusMode, Competition, CompetitionConfig, CompetitionId, FormatType, GroupId, ParticipantId,
    ParticipantScope, Round, RoundStatus, ScoringBasis, TeamId,
};
use crate::score::aggregate::{HoleScore, aggregate_participant};
use crate::score::sort_utils::{competition_ranks, points_then_holes};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StandaloneBadge {
    pub competition_id: CompetitionId,
    pub label: String,
    /// e.g. `NTP H3`
    pub short_label: String,
    pub hole_number: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreboardRow {
    pub participant_id: ParticipantId,
    pub person_id: String,
    pub display_name: String,
    pub group_id: Option<GroupId>,
    pub team_id: Option<TeamId>,
    pub playing_handicap: i32,
    pub gross_strokes: i32,
    pub net_strokes: i32,
    pub stableford_points: i32,
    pub relative_to_par: i32,
    pub holes_completed: u32,
    pub contributor_bonus_total: i32,
    pub standalone_badges: Vec<StandaloneBadge>,
    /// Primary basis value with contributor bonuses folded in; `None` without a primary basis.
    pub total: Option<i32>,
    pub rank: Option<u32>,
    pub hole_scores: Vec<HoleScore>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IndividualScoreboard {
    pub rows: Vec<ScoreboardRow>,
    pub primary_scoring_basis: Option<ScoringBasis>,
    pub has_contributor_bonuses: bool,
    pub total_holes: u32,
}

/// Basis of the round's first round-wide stableford or stroke play competition, or failing
/// that of its first within-group one.
///
/// Stroke play competitions whose config does not parse are skipped.
#[must_use]
pub fn primary_scoring_basis(round: &Round) -> Option<ScoringBasis> {
    [ParticipantScope::Round, ParticipantScope::WithinGroup]
        .into_iter()
        .flat_map(|scope| {
            round
                .competitions
                .iter()
                .filter(move |c| c.participant_scope == scope)
        })
        .find_map(scoring_basis_of)
}

fn scoring_basis_of(competition: &Competition) -> Option<ScoringBasis> {
    match competition.format_type.parse::<FormatType>().ok()? {
        FormatType::Stableford => Some(ScoringBasis::Stableford),
        FormatType::StrokePlay => match CompetitionConfig::from_competition(competition) {
            Ok(CompetitionConfig::StrokePlay(config)) => Some(config.scoring_basis.into()),
            Ok(_) => None,
            Err(e) => {
                warn!("round scoreboard skips stroke play competition {}: {e}", competition.id);
                None
            }
        },
        _ => None,
    }
}

#[derive(Default)]
struct BonusTally {
    contributor_points: i32,
    badges: Vec<StandaloneBadge>,
}

/// Contributor points and standalone badges per participant, from the current awards.
///
/// Bonus competitions whose config does not parse award nothing.
fn tally_bonuses(round: &Round) -> (AHashMap<ParticipantId, BonusTally>, bool) {
    let mut tallies: AHashMap<ParticipantId, BonusTally> = AHashMap::new();
    let mut has_contributor = false;

    for competition in &round.competitions {
        let Ok(format) = competition.format_type.parse::<FormatType>() else {
            continue;
        };
        if !format.is_bonus() {
            continue;
        }
        let config = match CompetitionConfig::from_competition(competition) {
            Ok(config) => config,
            Err(e) => {
                warn!("round scoreboard skips bonus competition {}: {e}", competition.id);
                continue;
            }
        };
        let Some(bonus) = config.bonus() else {
            continue;
        };
        if bonus.bonus_mode == BonusMode::Contributor {
            has_contributor = true;
        }
        let Some(award) = current_award(&round.bonus_awards, &competition.id) else {
            continue;
        };
        let hole_number = bonus.hole_number.unwrap_or_default();
        let tally = tallies.entry(award.round_participant_id.clone()).or_default();
        match bonus.bonus_mode {
            BonusMode::Contributor => tally.contributor_points += bonus.bonus_points,
            BonusMode::Standalone => tally.badges.push(StandaloneBadge {
                competition_id: competition.id.clone(),
                label: competition.name.clone(),
                short_label: bonus_badge(format, hole_number),
                hole_number,
            }),
        }
    }
    (tallies, has_contributor)
}

/// One row per participant with totals, bonuses and a rank on the primary basis.
///
/// Stableford totals add contributor points; stroke totals subtract them. Without a primary
/// basis rows keep round order and stay unranked.
///
/// # Errors
/// `InvalidStrokeIndexTable` and `MissingHandicap`.
pub fn build_individual_scoreboard(round: &Round) -> Result<IndividualScoreboard> {
    let holes = HoleTable::new(&round.holes)?;
    build_scoreboard_with(round, &holes)
}

fn build_scoreboard_with(round: &Round, holes: &HoleTable) -> Result<IndividualScoreboard> {
    let basis = primary_scoring_basis(round);
    let (mut tallies, has_contributor_bonuses) = tally_bonuses(round);

    let mut rows = Vec::with_capacity(round.participants.len());
    for participant in &round.participants {
        let totals = aggregate_participant(participant, holes, &round.scorecard)?;
        let tally = tallies.remove(&participant.id).unwrap_or_default();
        let total = basis.map(|b| match b {
            ScoringBasis::Stableford => totals.stableford_points + tally.contributor_points,
            ScoringBasis::NetStrokes => totals.net_strokes - tally.contributor_points,
            ScoringBasis::GrossStrokes => totals.gross_strokes - tally.contributor_points,
        });
        rows.push(ScoreboardRow {
            participant_id: participant.id.clone(),
            person_id: participant.person_id.clone(),
            display_name: participant.display_name.clone(),
            group_id: participant.group_id.clone(),
            team_id: round.team_of(participant).map(|t| t.id.clone()),
            playing_handicap: totals.playing_handicap,
            gross_strokes: totals.gross_strokes,
            net_strokes: totals.net_strokes,
            stableford_points: totals.stableford_points,
            relative_to_par: totals.relative_to_par,
            holes_completed: totals.holes_completed,
            contributor_bonus_total: tally.contributor_points,
            standalone_badges: tally.badges,
            total,
            rank: None,
            hole_scores: totals.hole_scores,
        });
    }

    match basis {
        Some(ScoringBasis::Stableford) => {
            rows.sort_by(|a, b| {
                points_then_holes(
                    (f64::from(a.total.unwrap_or_default()), a.holes_completed),
                    (f64::from(b.total.unwrap_or_default()), b.holes_completed),
                )
            });
            let ranks = competition_ranks(&rows, |a, b| {
                a.total == b.total && a.holes_completed == b.holes_completed
            });
            for (row, rank) in rows.iter_mut().zip(ranks) {
                row.rank = Some(rank);
            }
        }
        Some(ScoringBasis::NetStrokes | ScoringBasis::GrossStrokes) => {
            rows.sort_by_key(|r| (r.holes_completed == 0, r.total));
            let started = rows.iter().filter(|r| r.holes_completed > 0).count();
            let ranks = competition_ranks(&rows[..started], |a, b| a.total == b.total);
            for (row, rank) in rows.iter_mut().zip(ranks) {
                row.rank = Some(rank);
            }
        }
        None => {}
    }

    Ok(IndividualScoreboard {
        rows,
        primary_scoring_basis: basis,
        has_contributor_bonuses,
        total_holes: holes.len() as u32,
    })
}

/// A competition of the round that could not be resolved.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompetitionFailure {
    pub competition_id: CompetitionId,
    pub name: String,
    /// As stored on the competition, which may not name a known format.
    pub format_type: String,
    pub error: ScoringError,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundResults {
    pub round_id: String,
    pub round_number: Option<u32>,
    pub course_name: String,
    pub status: RoundStatus,
    pub scoreboard: IndividualScoreboard,
    /// Resolved competitions in round order.
    pub competitions: Vec<CompetitionOutcome>,
    pub failed_competitions: Vec<CompetitionFailure>,
}

/// The scoreboard and every competition of the round, each resolved on its own.
///
/// A competition that fails to resolve is listed under `failed_competitions` and does not
/// affect the scoreboard or the other competitions.
///
/// # Errors
/// `InvalidStrokeIndexTable` and `MissingHandicap` from the scoreboard.
pub fn build_round_results(round: &Round) -> Result<RoundResults> {
    let holes = HoleTable::new(&round.holes)?;
    let scoreboard = build_scoreboard_with(round, &holes)?;

    let mut competitions = Vec::with_capacity(round.competitions.len());
    let mut failed_competitions = Vec::new();
    for competition in &round.competitions {
        match resolve_competition(round, &holes, competition) {
            Ok(outcome) => competitions.push(outcome),
            Err(error) => {
                warn!(
                    "round {} competition {} ({}) failed: {error}",
                    round.id, competition.id, competition.format_type
                );
                failed_competitions.push(CompetitionFailure {
                    competition_id: competition.id.clone(),
                    name: competition.name.clone(),
                    format_type: competition.format_type.clone(),
                    error,
                });
            }
        }
    }
    debug!(
        "round {} resolved: {} participants, {} competitions, {} failed",
        round.id,
        scoreboard.rows.len(),
        competitions.len(),
        failed_competitions.len()
    );
    Ok(RoundResults {
        round_id: round.id.clone(),
        round_number: round.round_number,
        course_name: round.course_name.clone(),
        status: round.status,
        scoreboard,
        competitions,
        failed_competitions,
    })
}
