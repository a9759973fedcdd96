//! Per-format competition resolvers and the table that dispatches to them.
//!
//! Each resolver is a pure function of a [`FormatInput`] and the competition's typed config.

pub mod best_ball;
pub mod bonus;
pub mod chair;
pub mod hi_lo;
pub mod match_play;
pub mod rumble;
pub mod six_point;
pub mod stableford;
pub mod stroke_play;
pub mod wolf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::handicap::HoleTable;
use crate::model::{
    Competition, CompetitionConfig, FormatType, GroupId, Participant, ParticipantScope, Round,
    Team,
};
use crate::score::aggregate::{ParticipantTotals, aggregate_participant};

pub use best_ball::*;
pub use bonus::*;
pub use chair::*;
pub use hi_lo::*;
pub use match_play::*;
pub use rumble::*;
pub use six_point::*;
pub use stableford::*;
pub use stroke_play::*;
pub use wolf::*;

/// A participant's scorecard reduced against the round's hole table.
#[derive(Clone, Debug)]
pub struct PlayerCard<'a> {
    pub participant: &'a Participant,
    pub totals: ParticipantTotals,
}

impl PlayerCard<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.participant.id
    }

    /// Net strokes on the hole at `hole_idx` (hole table order).
    #[must_use]
    pub fn net(&self, hole_idx: usize) -> Option<i32> {
        self.totals.hole_scores.get(hole_idx).and_then(|h| h.net_strokes)
    }

    #[must_use]
    pub fn gross(&self, hole_idx: usize) -> Option<i32> {
        self.totals.hole_scores.get(hole_idx).and_then(|h| h.gross_strokes)
    }

    /// Stableford points on a scored hole.
    #[must_use]
    pub fn stableford(&self, hole_idx: usize) -> Option<i32> {
        self.totals
            .hole_scores
            .get(hole_idx)
            .filter(|h| h.gross_strokes.is_some())
            .map(|h| h.stableford)
    }
}

/// Everything a resolver may look at: the round snapshot and the participants in scope.
#[derive(Clone, Debug)]
pub struct FormatInput<'a> {
    pub round: &'a Round,
    pub competition: &'a Competition,
    pub holes: &'a HoleTable,
    /// In-scope participants in round order.
    pub participants: Vec<&'a Participant>,
}

impl<'a> FormatInput<'a> {
    /// # Errors
    /// `MissingHandicap` for any in-scope participant without a handicap.
    pub fn player_cards(&self) -> Result<Vec<PlayerCard<'a>>> {
        self.participants
            .iter()
            .map(|p| {
                Ok(PlayerCard {
                    participant: *p,
                    totals: aggregate_participant(p, self.holes, &self.round.scorecard)?,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn team_of(&self, participant: &Participant) -> Option<&'a Team> {
        self.round.team_of(participant)
    }

    /// Teams with at least one in-scope participant, in order of first appearance.
    #[must_use]
    pub fn teams_in_scope(&self) -> Vec<&'a Team> {
        let mut teams: Vec<&'a Team> = Vec::new();
        for p in &self.participants {
            if let Some(team) = self.team_of(p) {
                if !teams.iter().any(|t| t.id == team.id) {
                    teams.push(team);
                }
            }
        }
        teams
    }

    /// In-scope participants currently playing for `team_id`.
    #[must_use]
    pub fn team_members<'c>(
        &self,
        cards: &'c [PlayerCard<'a>],
        team_id: &str,
    ) -> Vec<&'c PlayerCard<'a>> {
        cards
            .iter()
            .filter(|c| self.team_of(c.participant).is_some_and(|t| t.id == team_id))
            .collect()
    }

    /// # Errors
    /// `UnknownTeam` when the id is not a team of the round.
    pub fn team(&self, team_id: &str) -> Result<&'a Team> {
        self.round
            .teams
            .iter()
            .find(|t| t.id == team_id)
            .ok_or_else(|| ScoringError::UnknownTeam(team_id.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum CompetitionResult {
    Stableford(StablefordResult),
    StrokePlay(StrokePlayResult),
    MatchPlay(MatchPlayResult),
    BestBall(BestBallResult),
    HiLo(HiLoResult),
    Rumble(RumbleResult),
    SixPoint(SixPointResult),
    Chair(ChairResult),
    Wolf(WolfResult),
    NearestPin(BonusResult),
    LongestDrive(BonusResult),
}

impl CompetitionResult {
    #[must_use]
    pub fn format_type(&self) -> FormatType {
        match self {
            CompetitionResult::Stableford(_) => FormatType::Stableford,
            CompetitionResult::StrokePlay(_) => FormatType::StrokePlay,
            CompetitionResult::MatchPlay(_) => FormatType::MatchPlay,
            CompetitionResult::BestBall(_) => FormatType::BestBall,
            CompetitionResult::HiLo(_) => FormatType::HiLo,
            CompetitionResult::Rumble(_) => FormatType::Rumble,
            CompetitionResult::SixPoint(_) => FormatType::SixPoint,
            CompetitionResult::Chair(_) => FormatType::Chair,
            CompetitionResult::Wolf(_) => FormatType::Wolf,
            CompetitionResult::NearestPin(_) => FormatType::NearestPin,
            CompetitionResult::LongestDrive(_) => FormatType::LongestDrive,
        }
    }
}

type ResolverFn = fn(&FormatInput<'_>, &CompetitionConfig) -> Result<CompetitionResult>;

fn config_mismatch(input: &FormatInput<'_>, config: &CompetitionConfig) -> ScoringError {
    ScoringError::InvalidCompetitionConfig {
        competition_id: input.competition.id.clone(),
        reason: format!("config for {} given to another resolver", config.format_type()),
    }
}

fn run_stableford(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::Stableford(_) => {
            Ok(CompetitionResult::Stableford(calculate_stableford(input)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_stroke_play(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::StrokePlay(c) => {
            Ok(CompetitionResult::StrokePlay(calculate_stroke_play(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_match_play(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::MatchPlay(c) => {
            Ok(CompetitionResult::MatchPlay(calculate_match_play(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_best_ball(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::BestBall(c) => {
            Ok(CompetitionResult::BestBall(calculate_best_ball(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_hi_lo(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::HiLo(c) => Ok(CompetitionResult::HiLo(calculate_hi_lo(input, c)?)),
        other => Err(config_mismatch(input, other)),
    }
}

fn run_rumble(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::Rumble(c) => Ok(CompetitionResult::Rumble(calculate_rumble(input, c)?)),
        other => Err(config_mismatch(input, other)),
    }
}

fn run_six_point(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::SixPoint(c) => {
            Ok(CompetitionResult::SixPoint(calculate_six_point(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_chair(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::Chair(_) => Ok(CompetitionResult::Chair(calculate_chair(input)?)),
        other => Err(config_mismatch(input, other)),
    }
}

fn run_wolf(input: &FormatInput<'_>, config: &CompetitionConfig) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::Wolf(c) => Ok(CompetitionResult::Wolf(calculate_wolf(input, c)?)),
        other => Err(config_mismatch(input, other)),
    }
}

fn run_nearest_pin(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::NearestPin(c) => {
            Ok(CompetitionResult::NearestPin(resolve_bonus(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

fn run_longest_drive(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    match config {
        CompetitionConfig::LongestDrive(c) => {
            Ok(CompetitionResult::LongestDrive(resolve_bonus(input, c)?))
        }
        other => Err(config_mismatch(input, other)),
    }
}

/// Adding a format means adding one resolver and one row here.
const FORMAT_RESOLVERS: &[(FormatType, ResolverFn)] = &[
    (FormatType::Stableford, run_stableford),
    (FormatType::StrokePlay, run_stroke_play),
    (FormatType::MatchPlay, run_match_play),
    (FormatType::BestBall, run_best_ball),
    (FormatType::HiLo, run_hi_lo),
    (FormatType::Rumble, run_rumble),
    (FormatType::SixPoint, run_six_point),
    (FormatType::Chair, run_chair),
    (FormatType::Wolf, run_wolf),
    (FormatType::NearestPin, run_nearest_pin),
    (FormatType::LongestDrive, run_longest_drive),
];

/// Resolve one competition over the given participants.
///
/// # Errors
/// Whatever the format's resolver reports; `UnknownFormatType` if the table has no entry.
pub fn calculate_competition_result(
    input: &FormatInput<'_>,
    config: &CompetitionConfig,
) -> Result<CompetitionResult> {
    let format_type = config.format_type();
    let resolver = FORMAT_RESOLVERS
        .iter()
        .find(|(f, _)| *f == format_type)
        .map(|(_, r)| *r)
        .ok_or_else(|| ScoringError::UnknownFormatType(format_type.to_string()))?;
    debug!(
        "resolving {} competition {} over {} participants",
        format_type,
        input.competition.id,
        input.participants.len()
    );
    resolver(input, config)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GroupCompetitionResult {
    pub group_id: GroupId,
    pub group_number: u32,
    pub group_name: Option<String>,
    pub result: CompetitionResult,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ScopedResult {
    Round { result: CompetitionResult },
    WithinGroup { groups: Vec<GroupCompetitionResult> },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompetitionOutcome {
    pub competition_id: String,
    pub name: String,
    pub format_type: FormatType,
    pub label: String,
    #[serde(flatten)]
    pub scoped: ScopedResult,
}

impl CompetitionOutcome {
    /// Every result object of the competition, one per group for within-group play.
    #[must_use]
    pub fn results(&self) -> Vec<&CompetitionResult> {
        match &self.scoped {
            ScopedResult::Round { result } => vec![result],
            ScopedResult::WithinGroup { groups } => groups.iter().map(|g| &g.result).collect(),
        }
    }
}

/// Resolve a competition of a round, once per group for within-group competitions.
///
/// Within-group scope falls back to the whole round when the round has no groups; bonus
/// contests are always round-wide.
///
/// # Errors
/// Configuration errors from parsing and any error of the format's resolver.
pub fn resolve_competition(
    round: &Round,
    holes: &HoleTable,
    competition: &Competition,
) -> Result<CompetitionOutcome> {
    let config = CompetitionConfig::from_competition(competition)?;
    let format_type = config.format_type();

    let within_group = competition.participant_scope == ParticipantScope::WithinGroup
        && !round.groups.is_empty()
        && !format_type.is_bonus();

    let scoped = if within_group {
        let mut groups = Vec::new();
        for group in round.groups_in_order() {
            let members = round.group_members(&group.id);
            if members.is_empty() {
                continue;
            }
            let input = FormatInput {
                round,
                competition,
                holes,
                participants: members,
            };
            groups.push(GroupCompetitionResult {
                group_id: group.id.clone(),
                group_number: group.group_number,
                group_name: group.name.clone(),
                result: calculate_competition_result(&input, &config)?,
            });
        }
        ScopedResult::WithinGroup { groups }
    } else {
        let input = FormatInput {
            round,
            competition,
            holes,
            participants: round.participants.iter().collect(),
        };
        ScopedResult::Round {
            result: calculate_competition_result(&input, &config)?,
        }
    };

    Ok(CompetitionOutcome {
        competition_id: competition.id.clone(),
        name: competition.name.clone(),
        format_type,
        label: format_type.label().to_string(),
        scoped,
    })
}
