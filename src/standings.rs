//! Tournament-wide standings built from finalized rounds.

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::{CompetitionResult, MatchStatus, MatchWinner, resolve_competition};
use crate::handicap::HoleTable;
use crate::model::{
    AggregationMethod, BonusMode, CompetitionConfig, FormatType, MatchWinsConfig, ParticipantType,
    Round, SortDirection, StandingConfig, StrokeBasis,
};
use crate::score::aggregate::{ParticipantTotals, aggregate_participant};
use crate::score::sort_utils::competition_ranks;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StandingRound {
    pub round_id: String,
    pub round_number: Option<u32>,
    pub course_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundValue {
    pub round_id: String,
    pub round_number: Option<u32>,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StandingEntry {
    /// Person id for individual standings, team id for team standings.
    pub entity_id: String,
    pub display_name: String,
    pub per_round: Vec<RoundValue>,
    pub rounds_played: u32,
    pub bonus_total: i32,
    pub total: f64,
    pub rank: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StandingResult {
    pub standing_id: String,
    pub name: String,
    pub participant_type: ParticipantType,
    pub method: String,
    pub rounds: Vec<StandingRound>,
    pub leaderboard: Vec<StandingEntry>,
    pub sort_direction: SortDirection,
}

/// Accumulates entries in order of first appearance.
#[derive(Default)]
struct Ledger {
    index: AHashMap<String, usize>,
    entries: Vec<StandingEntry>,
}

impl Ledger {
    fn entry(&mut self, entity_id: &str, display_name: &str) -> &mut StandingEntry {
        let idx = match self.index.get(entity_id) {
            Some(&idx) => idx,
            None => {
                self.entries.push(StandingEntry {
                    entity_id: entity_id.to_string(),
                    display_name: display_name.to_string(),
                    per_round: Vec::new(),
                    rounds_played: 0,
                    bonus_total: 0,
                    total: 0.0,
                    rank: 0,
                });
                self.index.insert(entity_id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx];
        // latest round's name wins
        entry.display_name = display_name.to_string();
        entry
    }
}

/// A participant's or team's part in one round.
struct RoundEntity<'r> {
    entity_id: String,
    display_name: String,
    members: Vec<&'r str>,
    played: bool,
}

fn round_entities<'r>(
    round: &'r Round,
    participant_type: ParticipantType,
    totals: &AHashMap<&'r str, ParticipantTotals>,
) -> Vec<RoundEntity<'r>> {
    let played = |id: &str| totals.get(id).is_some_and(|t| t.holes_completed > 0);
    match participant_type {
        ParticipantType::Individual => round
            .participants
            .iter()
            .map(|p| RoundEntity {
                entity_id: p.person_id.clone(),
                display_name: p.display_name.clone(),
                members: vec![p.id.as_str()],
                played: played(&p.id),
            })
            .collect(),
        ParticipantType::Team => round
            .teams
            .iter()
            .map(|team| {
                let members: Vec<&str> = round
                    .participants
                    .iter()
                    .filter(|p| round.team_of(p).is_some_and(|t| t.id == team.id))
                    .map(|p| p.id.as_str())
                    .collect();
                RoundEntity {
                    entity_id: team.id.clone(),
                    display_name: team.name.clone(),
                    played: members.iter().any(|m| played(m)),
                    members,
                }
            })
            .collect(),
    }
}

fn match_points(status: &MatchStatus, is_side_a: bool, config: &MatchWinsConfig) -> f64 {
    if !status.is_decided {
        return 0.0;
    }
    match status.winner {
        Some(MatchWinner::Halved) => config.points_per_half,
        Some(MatchWinner::A) if is_side_a => config.points_per_win,
        Some(MatchWinner::B) if !is_side_a => config.points_per_win,
        _ => 0.0,
    }
}

/// Match points per entity id in one round: singles for individuals, best ball and hi-lo for
/// teams.
fn round_match_points(
    round: &Round,
    holes: &HoleTable,
    participant_type: ParticipantType,
    config: &MatchWinsConfig,
) -> Result<AHashMap<String, f64>> {
    let mut points: AHashMap<String, f64> = AHashMap::new();
    let wanted: &[FormatType] = match participant_type {
        ParticipantType::Individual => &[FormatType::MatchPlay],
        ParticipantType::Team => &[FormatType::BestBall, FormatType::HiLo],
    };

    for competition in &round.competitions {
        let Ok(format) = competition.format_type.parse::<FormatType>() else {
            continue;
        };
        if !wanted.contains(&format) {
            continue;
        }
        let outcome = resolve_competition(round, holes, competition)?;
        for result in outcome.results() {
            let mut credit = |id: &str, p: f64| *points.entry(id.to_string()).or_default() += p;
            match result {
                CompetitionResult::MatchPlay(r) => {
                    for m in &r.matches {
                        let person = |pid: &str| {
                            round
                                .participant(pid)
                                .map_or_else(|| pid.to_string(), |p| p.person_id.clone())
                        };
                        let (a, b) = (
                            person(&m.player_a.participant_id),
                            person(&m.player_b.participant_id),
                        );
                        credit(&a, match_points(&m.status, true, config));
                        credit(&b, match_points(&m.status, false, config));
                    }
                }
                CompetitionResult::BestBall(r) => {
                    for m in &r.matches {
                        credit(&m.team_a.team_id, match_points(&m.status, true, config));
                        credit(&m.team_b.team_id, match_points(&m.status, false, config));
                    }
                }
                CompetitionResult::HiLo(r) => {
                    for m in &r.matches {
                        credit(&m.team_a.team_id, match_points(&m.status, true, config));
                        credit(&m.team_b.team_id, match_points(&m.status, false, config));
                    }
                }
                _ => {}
            }
        }
    }
    Ok(points)
}

/// Contributor bonus points per participant id in one round.
fn round_bonus_points(round: &Round) -> Result<AHashMap<String, i32>> {
    let mut points: AHashMap<String, i32> = AHashMap::new();
    for competition in &round.competitions {
        let Ok(format) = competition.format_type.parse::<FormatType>() else {
            continue;
        };
        if !format.is_bonus() {
            continue;
        }
        let config = CompetitionConfig::from_competition(competition)?;
        let Some(bonus) = config.bonus().filter(|b| b.bonus_mode == BonusMode::Contributor) else {
            continue;
        };
        if let Some(award) = crate::formats::current_award(&round.bonus_awards, &competition.id) {
            *points.entry(award.round_participant_id.clone()).or_default() += bonus.bonus_points;
        }
    }
    Ok(points)
}

/// Combine the finalized rounds of a tournament into one ranked standing.
///
/// Open rounds are ignored. An entity's `per_round` only lists rounds it took part in, that is
/// rounds where it (or, for a team, any member) completed at least one hole. Under match wins
/// it must also have played a match in the round; contributor bonuses from other rounds still
/// count toward its total.
///
/// # Errors
/// `UnknownAggregationMethod`, plus any error raised while scoring a finalized round.
pub fn compute_standing(standing: &StandingConfig, rounds: &[Round]) -> Result<StandingResult> {
    let method = AggregationMethod::parse(
        &standing.aggregation_config.method,
        standing.aggregation_config.config.as_ref(),
    )?;
    let participant_type = standing.participant_type;

    let mut finalized: Vec<&Round> = rounds.iter().filter(|r| r.is_finalized()).collect();
    finalized.sort_by_key(|r| (r.round_number.is_none(), r.round_number));
    debug!(
        "standing {}: {} of {} rounds finalized",
        standing.id,
        finalized.len(),
        rounds.len()
    );

    let mut ledger = Ledger::default();
    for round in &finalized {
        let holes = HoleTable::new(&round.holes)?;
        let mut totals: AHashMap<&str, ParticipantTotals> = AHashMap::new();
        for p in &round.participants {
            totals.insert(p.id.as_str(), aggregate_participant(p, &holes, &round.scorecard)?);
        }
        let match_points = match &method {
            AggregationMethod::MatchWins(cfg) => {
                round_match_points(round, &holes, participant_type, cfg)?
            }
            _ => AHashMap::new(),
        };
        let bonus_points = round_bonus_points(round)?;

        for entity in round_entities(round, participant_type, &totals) {
            if !entity.played {
                continue;
            }
            let member_totals = entity.members.iter().filter_map(|m| totals.get(m));
            let value = match &method {
                AggregationMethod::SumStableford => {
                    Some(member_totals.map(|t| f64::from(t.stableford_points)).sum())
                }
                AggregationMethod::LowestStrokes(cfg) => Some(
                    member_totals
                        .map(|t| match cfg.scoring_basis {
                            StrokeBasis::NetStrokes => f64::from(t.net_strokes),
                            StrokeBasis::GrossStrokes => f64::from(t.gross_strokes),
                        })
                        .sum(),
                ),
                AggregationMethod::MatchWins(_) => match_points.get(&entity.entity_id).copied(),
            };
            let bonus: i32 = entity
                .members
                .iter()
                .filter_map(|m| bonus_points.get(*m))
                .sum();
            if value.is_none() && bonus == 0 {
                continue;
            }

            let entry = ledger.entry(&entity.entity_id, &entity.display_name);
            if let Some(value) = value {
                entry.per_round.push(RoundValue {
                    round_id: round.id.clone(),
                    round_number: round.round_number,
                    value,
                });
                entry.rounds_played += 1;
            }
            entry.bonus_total += bonus;
        }
    }

    let sort_direction = method.sort_direction();
    let mut leaderboard = ledger.entries;
    for entry in &mut leaderboard {
        entry.total =
            entry.per_round.iter().map(|r| r.value).sum::<f64>() + f64::from(entry.bonus_total);
    }
    leaderboard.sort_by(|a, b| match sort_direction {
        SortDirection::Asc => a.total.total_cmp(&b.total),
        SortDirection::Desc => b.total.total_cmp(&a.total),
    });
    let ranks = competition_ranks(&leaderboard, |a, b| a.total == b.total);
    for (entry, rank) in leaderboard.iter_mut().zip(ranks) {
        entry.rank = rank;
    }

    Ok(StandingResult {
        standing_id: standing.id.clone(),
        name: standing.name.clone(),
        participant_type,
        method: standing.aggregation_config.method.clone(),
        rounds: finalized
            .iter()
            .map(|r| StandingRound {
                round_id: r.id.clone(),
                round_number: r.round_number,
                course_name: r.course_name.clone(),
            })
            .collect(),
        leaderboard,
        sort_direction,
    })
}
