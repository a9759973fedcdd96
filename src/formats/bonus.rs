use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::formats::FormatInput;
use crate::model::{
    BonusAward, BonusConfig, BonusMode, CompetitionConfig, CompetitionId, FormatType,
    ParticipantId, Round,
};

/// Long label for a bonus contest, e.g. `Nearest the Pin - Hole 3`.
#[must_use]
pub fn format_bonus_label(format: FormatType, hole_number: u32) -> String {
    format!("{} - Hole {hole_number}", format.label())
}

/// Scoreboard badge, e.g. `NTP H3` or `LD H7`.
#[must_use]
pub fn bonus_badge(format: FormatType, hole_number: u32) -> String {
    let short = match format {
        FormatType::NearestPin => "NTP",
        FormatType::LongestDrive => "LD",
        other => other.as_str(),
    };
    format!("{short} H{hole_number}")
}

/// The standing award for a competition: the last one given wins.
#[must_use]
pub fn current_award<'a>(awards: &'a [BonusAward], competition_id: &str) -> Option<&'a BonusAward> {
    awards
        .iter()
        .rev()
        .find(|a| a.competition_id == competition_id)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BonusWinner {
    pub participant_id: ParticipantId,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BonusResult {
    pub hole_number: u32,
    pub label: String,
    pub badge: String,
    pub bonus_mode: BonusMode,
    pub bonus_points: i32,
    pub winner: Option<BonusWinner>,
    pub is_decided: bool,
}

/// # Errors
/// `UnknownParticipant` when the award names somebody outside the round.
pub fn resolve_bonus(input: &FormatInput<'_>, config: &BonusConfig) -> Result<BonusResult> {
    let format: FormatType = input.competition.format_type.parse()?;
    let hole_number = config
        .hole_number
        .or(input.competition.hole_number)
        .unwrap_or_default();

    let winner = match current_award(&input.round.bonus_awards, &input.competition.id) {
        None => None,
        Some(award) => {
            let participant = input
                .round
                .participant(&award.round_participant_id)
                .ok_or_else(|| {
                    ScoringError::UnknownParticipant(award.round_participant_id.clone())
                })?;
            Some(BonusWinner {
                participant_id: participant.id.clone(),
                display_name: participant.display_name.clone(),
            })
        }
    };

    Ok(BonusResult {
        hole_number,
        label: format_bonus_label(format, hole_number),
        badge: bonus_badge(format, hole_number),
        bonus_mode: config.bonus_mode,
        bonus_points: config.bonus_points,
        is_decided: winner.is_some(),
        winner,
    })
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BonusHole {
    pub competition_id: CompetitionId,
    pub competition_name: String,
    pub format_type: FormatType,
    pub hole_number: u32,
    pub bonus_mode: BonusMode,
}

/// Bonus contests of a round and the holes they are played on, in hole order.
///
/// # Errors
/// `InvalidCompetitionConfig` for a bonus contest without a hole or with a malformed config.
pub fn get_bonus_holes(round: &Round) -> Result<Vec<BonusHole>> {
    let mut holes = Vec::new();
    for competition in &round.competitions {
        let Ok(format) = competition.format_type.parse::<FormatType>() else {
            continue;
        };
        if !format.is_bonus() {
            continue;
        }
        let config = CompetitionConfig::from_competition(competition)?;
        if let Some(bonus) = config.bonus() {
            holes.push(BonusHole {
                competition_id: competition.id.clone(),
                competition_name: competition.name.clone(),
                format_type: format,
                hole_number: bonus.hole_number.unwrap_or_default(),
                bonus_mode: bonus.bonus_mode,
            });
        }
    }
    holes.sort_by_key(|h| h.hole_number);
    Ok(holes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_are_short() {
        assert_eq!(bonus_badge(FormatType::NearestPin, 3), "NTP H3");
        assert_eq!(bonus_badge(FormatType::LongestDrive, 7), "LD H7");
        assert_eq!(
            format_bonus_label(FormatType::LongestDrive, 7),
            "Longest Drive - Hole 7"
        );
    }

    #[test]
    fn later_award_overwrites() {
        let award = |c: &str, p: &str| BonusAward {
            competition_id: c.to_string(),
            round_participant_id: p.to_string(),
        };
        let awards = vec![award("ntp", "a"), award("ld", "b"), award("ntp", "c")];
        assert_eq!(
            current_award(&awards, "ntp").map(|a| a.round_participant_id.as_str()),
            Some("c")
        );
        assert!(current_award(&awards, "other").is_none());
    }
}
