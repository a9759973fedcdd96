//! Reduce append-only event logs into the current views the engine consumes.
//!
//! Ordering is by `recorded_at`; events with the same timestamp keep input order, so the
//! later one in the slice wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::types::{
    BonusAward, CompetitionId, GameDecision, ParticipantId, RecordedByRole, ScoreEntry, Scorecard,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreEvent {
    pub participant_id: ParticipantId,
    pub hole_number: u32,
    pub strokes: i32,
    #[serde(default)]
    pub recorded_by_role: RecordedByRole,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DecisionEvent {
    pub decision: GameDecision,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AwardEvent {
    pub award: BonusAward,
    pub recorded_at: DateTime<Utc>,
}

fn in_time_order<T>(events: &[T], at: impl Fn(&T) -> DateTime<Utc>) -> Vec<&T> {
    let mut ordered: Vec<&T> = events.iter().collect();
    // stable sort keeps input order for equal timestamps
    ordered.sort_by_key(|e| at(e));
    ordered
}

impl Scorecard {
    /// Build the current scorecard from score submissions, last write wins.
    #[must_use]
    pub fn from_events(events: &[ScoreEvent]) -> Self {
        let mut scorecard = Scorecard::new();
        for event in in_time_order(events, |e| e.recorded_at) {
            scorecard.record(
                &event.participant_id,
                event.hole_number,
                ScoreEntry {
                    strokes: event.strokes,
                    recorded_by_role: event.recorded_by_role,
                },
            );
        }
        scorecard
    }
}

/// One decision per (competition, hole), the latest one.
#[must_use]
pub fn latest_decisions(events: &[DecisionEvent]) -> Vec<GameDecision> {
    let mut latest: BTreeMap<(CompetitionId, u32), GameDecision> = BTreeMap::new();
    for event in in_time_order(events, |e| e.recorded_at) {
        let key = (
            event.decision.competition_id.clone(),
            event.decision.hole_number,
        );
        latest.insert(key, event.decision.clone());
    }
    latest.into_values().collect()
}

/// One award per bonus competition, the latest one.
#[must_use]
pub fn latest_awards(events: &[AwardEvent]) -> Vec<BonusAward> {
    let mut latest: BTreeMap<CompetitionId, BonusAward> = BTreeMap::new();
    for event in in_time_order(events, |e| e.recorded_at) {
        latest.insert(event.award.competition_id.clone(), event.award.clone());
    }
    latest.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 2, 9, minute, 0).unwrap()
    }

    fn score(participant: &str, hole: u32, strokes: i32, minute: u32) -> ScoreEvent {
        ScoreEvent {
            participant_id: participant.to_string(),
            hole_number: hole,
            strokes,
            recorded_by_role: RecordedByRole::Player,
            recorded_at: at(minute),
        }
    }

    #[test]
    fn corrections_replace_earlier_scores() {
        let mut marker = score("p1", 1, 5, 20);
        marker.recorded_by_role = RecordedByRole::Marker;
        // submitted out of order
        let events = vec![marker, score("p1", 1, 4, 10), score("p2", 1, 6, 11)];
        let card = Scorecard::from_events(&events);
        assert_eq!(card.strokes("p1", 1), Some(5));
        assert_eq!(card.strokes("p2", 1), Some(6));
        assert!(!card.has_score("p2", 2));
    }

    #[test]
    fn same_timestamp_keeps_input_order() {
        let events = vec![score("p1", 3, 4, 15), score("p1", 3, 3, 15)];
        assert_eq!(Scorecard::from_events(&events).strokes("p1", 3), Some(3));
    }

    #[test]
    fn one_decision_per_hole_and_one_award_per_contest() {
        let decision = |hole: u32, partner: Option<&str>, minute: u32| DecisionEvent {
            decision: GameDecision {
                competition_id: "wolf".to_string(),
                round_id: None,
                hole_number: hole,
                wolf_player_id: "w1".to_string(),
                partner_player_id: partner.map(str::to_string),
            },
            recorded_at: at(minute),
        };
        let decisions = latest_decisions(&[
            decision(1, Some("w2"), 30),
            decision(1, None, 5),
            decision(5, None, 40),
        ]);
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].partner_player_id.as_deref(), Some("w2"));

        let award = |who: &str, minute: u32| AwardEvent {
            award: BonusAward {
                competition_id: "ntp".to_string(),
                round_participant_id: who.to_string(),
            },
            recorded_at: at(minute),
        };
        let awards = latest_awards(&[award("p3", 50), award("p1", 12)]);
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].round_participant_id, "p3");
    }
}
