use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type ParticipantId = String;
pub type TeamId = String;
pub type GroupId = String;
pub type CompetitionId = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Hole {
    pub hole_number: u32,
    pub par: i32,
    pub stroke_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yardage: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub person_id: String,
    pub display_name: String,
    /// Frozen when the player joined the round.
    #[serde(default)]
    pub handicap_snapshot: Option<Decimal>,
    #[serde(default)]
    pub handicap_override: Option<Decimal>,
    #[serde(default)]
    pub tournament_handicap_override: Option<Decimal>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordedByRole {
    #[default]
    Player,
    Marker,
    Commissioner,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub strokes: i32,
    #[serde(default)]
    pub recorded_by_role: RecordedByRole,
}

/// Current strokes per participant and hole for one round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Scorecard {
    pub entries: BTreeMap<ParticipantId, BTreeMap<u32, ScoreEntry>>,
}

impl Scorecard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, participant_id: &str, hole_number: u32, entry: ScoreEntry) {
        self.entries
            .entry(participant_id.to_string())
            .or_default()
            .insert(hole_number, entry);
    }

    #[must_use]
    pub fn strokes(&self, participant_id: &str, hole_number: u32) -> Option<i32> {
        self.entries
            .get(participant_id)
            .and_then(|holes| holes.get(&hole_number))
            .map(|e| e.strokes)
    }

    #[must_use]
    pub fn has_score(&self, participant_id: &str, hole_number: u32) -> bool {
        self.strokes(participant_id, hole_number).is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantScope {
    #[default]
    Round,
    WithinGroup,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Competition {
    pub id: CompetitionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub round_id: Option<String>,
    pub format_type: String,
    #[serde(default)]
    pub config_json: serde_json::Value,
    #[serde(default)]
    pub participant_scope: ParticipantScope,
    #[serde(default)]
    pub hole_number: Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BonusAward {
    pub competition_id: CompetitionId,
    pub round_participant_id: ParticipantId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameDecision {
    pub competition_id: CompetitionId,
    #[serde(default)]
    pub round_id: Option<String>,
    pub hole_number: u32,
    pub wolf_player_id: ParticipantId,
    /// `None` means lone wolf.
    #[serde(default)]
    pub partner_player_id: Option<ParticipantId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub group_number: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<ParticipantId>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Open,
    Finalized,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundStatus::Open => "open",
            RoundStatus::Finalized => "finalized",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Round {
    pub id: String,
    #[serde(default)]
    pub round_number: Option<u32>,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub status: RoundStatus,
    pub holes: Vec<Hole>,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
    #[serde(default)]
    pub scorecard: Scorecard,
    #[serde(default)]
    pub bonus_awards: Vec<BonusAward>,
    #[serde(default)]
    pub game_decisions: Vec<GameDecision>,
}

impl Round {
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.status == RoundStatus::Finalized
    }

    #[must_use]
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Team the participant currently plays for. `team_id` wins over the team roster.
    #[must_use]
    pub fn team_of(&self, participant: &Participant) -> Option<&Team> {
        match &participant.team_id {
            Some(team_id) => self.teams.iter().find(|t| &t.id == team_id),
            None => self
                .teams
                .iter()
                .find(|t| t.members.iter().any(|m| m == &participant.id)),
        }
    }

    /// Members of a group in round order, which is also the wolf rotation order.
    #[must_use]
    pub fn group_members(&self, group_id: &str) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.group_id.as_deref() == Some(group_id))
            .collect()
    }

    #[must_use]
    pub fn groups_in_order(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.iter().collect();
        groups.sort_by_key(|g| g.group_number);
        groups
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantType {
    #[default]
    Individual,
    Team,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AggregationConfig {
    pub method: String,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StandingConfig {
    pub id: String,
    #[serde(default)]
    pub tournament_id: String,
    pub name: String,
    #[serde(default)]
    pub participant_type: ParticipantType,
    pub aggregation_config: AggregationConfig,
}

/// Everything the CLI needs to compute standings for one tournament.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct TournamentSnapshot {
    #[serde(default)]
    pub standings: Vec<StandingConfig>,
    pub rounds: Vec<Round>,
}
