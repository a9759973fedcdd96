#![allow(dead_code)]

use rust_decimal::Decimal;
use rusty_golf_comps::formats::{
    CompetitionOutcome, CompetitionResult, ScopedResult, resolve_competition,
};
use rusty_golf_comps::handicap::HoleTable;
use rusty_golf_comps::model::{
    BonusAward, Competition, GameDecision, Group, Hole, Participant, ParticipantScope, Round,
    RoundStatus, ScoreEntry, Team,
};
use rusty_golf_comps::{Result, ScoringError};
use serde_json::Value;

pub const PARS_18: [i32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 3, 4, 5, 4];
pub const SI_18: [u32; 18] = [7, 3, 15, 1, 11, 5, 17, 9, 13, 8, 16, 2, 12, 4, 18, 6, 14, 10];

pub fn holes_18() -> Vec<Hole> {
    PARS_18
        .iter()
        .zip(SI_18)
        .enumerate()
        .map(|(i, (&par, stroke_index))| Hole {
            hole_number: i as u32 + 1,
            par,
            stroke_index,
            yardage: None,
        })
        .collect()
}

/// `n` par-4 holes with stroke index equal to the hole number.
pub fn par_four_holes(n: u32) -> Vec<Hole> {
    (1..=n)
        .map(|h| Hole {
            hole_number: h,
            par: 4,
            stroke_index: h,
            yardage: None,
        })
        .collect()
}

pub fn player(id: &str, handicap: Decimal) -> Participant {
    Participant {
        id: id.to_string(),
        person_id: format!("person-{id}"),
        display_name: id.to_uppercase(),
        handicap_snapshot: Some(handicap),
        handicap_override: None,
        tournament_handicap_override: None,
        group_id: None,
        team_id: None,
    }
}

pub struct RoundBuilder {
    round: Round,
}

impl RoundBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            round: Round {
                id: id.to_string(),
                course_name: "Test Links".to_string(),
                holes: holes_18(),
                ..Round::default()
            },
        }
    }

    pub fn holes(mut self, holes: Vec<Hole>) -> Self {
        self.round.holes = holes;
        self
    }

    pub fn participant(mut self, participant: Participant) -> Self {
        self.round.participants.push(participant);
        self
    }

    /// Adds the group and puts the named participants in it.
    pub fn group(mut self, id: &str, number: u32, members: &[&str]) -> Self {
        self.round.groups.push(Group {
            id: id.to_string(),
            group_number: number,
            name: Some(format!("Group {number}")),
        });
        for p in &mut self.round.participants {
            if members.contains(&p.id.as_str()) {
                p.group_id = Some(id.to_string());
            }
        }
        self
    }

    pub fn team(mut self, id: &str, name: &str, members: &[&str]) -> Self {
        self.round.teams.push(Team {
            id: id.to_string(),
            name: name.to_string(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
        });
        self
    }

    pub fn competition(
        mut self,
        id: &str,
        format: &str,
        config: Value,
        scope: ParticipantScope,
    ) -> Self {
        self.round.competitions.push(Competition {
            id: id.to_string(),
            name: format!("{format} {id}"),
            round_id: Some(self.round.id.clone()),
            format_type: format.to_string(),
            config_json: config,
            participant_scope: scope,
            hole_number: None,
        });
        self
    }

    /// Strokes from hole 1 onward; `0` leaves a hole unscored.
    pub fn scores(mut self, participant_id: &str, strokes: &[i32]) -> Self {
        for (i, &s) in strokes.iter().enumerate() {
            if s > 0 {
                self.round.scorecard.record(
                    participant_id,
                    i as u32 + 1,
                    ScoreEntry {
                        strokes: s,
                        recorded_by_role: Default::default(),
                    },
                );
            }
        }
        self
    }

    pub fn award(mut self, competition_id: &str, participant_id: &str) -> Self {
        self.round.bonus_awards.push(BonusAward {
            competition_id: competition_id.to_string(),
            round_participant_id: participant_id.to_string(),
        });
        self
    }

    pub fn decision(
        mut self,
        competition_id: &str,
        hole: u32,
        wolf: &str,
        partner: Option<&str>,
    ) -> Self {
        self.round.game_decisions.push(GameDecision {
            competition_id: competition_id.to_string(),
            round_id: Some(self.round.id.clone()),
            hole_number: hole,
            wolf_player_id: wolf.to_string(),
            partner_player_id: partner.map(str::to_string),
        });
        self
    }

    pub fn finalized(mut self, round_number: u32) -> Self {
        self.round.status = RoundStatus::Finalized;
        self.round.round_number = Some(round_number);
        self
    }

    pub fn build(self) -> Round {
        self.round
    }
}

/// Par on every hole of the 18-hole layout, adjusted per hole by `deltas` (hole, strokes over par).
pub fn pars_with(deltas: &[(usize, i32)]) -> Vec<i32> {
    let mut strokes = PARS_18.to_vec();
    for &(hole, delta) in deltas {
        strokes[hole - 1] += delta;
    }
    strokes
}

pub fn resolve(round: &Round, competition_id: &str) -> Result<CompetitionOutcome> {
    let holes = HoleTable::new(&round.holes)?;
    let competition = round
        .competitions
        .iter()
        .find(|c| c.id == competition_id)
        .ok_or_else(|| ScoringError::UnknownFormatType(competition_id.to_string()))?;
    resolve_competition(round, &holes, competition)
}

/// The single result of a round-scope competition.
pub fn round_result(outcome: CompetitionOutcome) -> CompetitionResult {
    match outcome.scoped {
        ScopedResult::Round { result } => result,
        ScopedResult::WithinGroup { mut groups } => groups.remove(0).result,
    }
}
