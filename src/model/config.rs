use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScoringError};
use crate::model::types::{Competition, ParticipantId, TeamId};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    Stableford,
    StrokePlay,
    MatchPlay,
    BestBall,
    HiLo,
    Rumble,
    SixPoint,
    Chair,
    Wolf,
    NearestPin,
    LongestDrive,
}

impl FormatType {
    pub const ALL: [FormatType; 11] = [
        FormatType::Stableford,
        FormatType::StrokePlay,
        FormatType::MatchPlay,
        FormatType::BestBall,
        FormatType::HiLo,
        FormatType::Rumble,
        FormatType::SixPoint,
        FormatType::Chair,
        FormatType::Wolf,
        FormatType::NearestPin,
        FormatType::LongestDrive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormatType::Stableford => "stableford",
            FormatType::StrokePlay => "stroke_play",
            FormatType::MatchPlay => "match_play",
            FormatType::BestBall => "best_ball",
            FormatType::HiLo => "hi_lo",
            FormatType::Rumble => "rumble",
            FormatType::SixPoint => "six_point",
            FormatType::Chair => "chair",
            FormatType::Wolf => "wolf",
            FormatType::NearestPin => "nearest_pin",
            FormatType::LongestDrive => "longest_drive",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormatType::Stableford => "Stableford",
            FormatType::StrokePlay => "Stroke Play",
            FormatType::MatchPlay => "Singles",
            FormatType::BestBall => "Best Ball",
            FormatType::HiLo => "Hi-Lo",
            FormatType::Rumble => "Rumble",
            FormatType::SixPoint => "Six Point",
            FormatType::Chair => "Chair",
            FormatType::Wolf => "Wolf",
            FormatType::NearestPin => "Nearest the Pin",
            FormatType::LongestDrive => "Longest Drive",
        }
    }

    #[must_use]
    pub fn is_bonus(self) -> bool {
        matches!(self, FormatType::NearestPin | FormatType::LongestDrive)
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        FormatType::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ScoringError::UnknownFormatType(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrokeBasis {
    #[default]
    NetStrokes,
    GrossStrokes,
}

/// Which column of the individual scoreboard is "the" result.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringBasis {
    Stableford,
    NetStrokes,
    GrossStrokes,
}

impl From<StrokeBasis> for ScoringBasis {
    fn from(value: StrokeBasis) -> Self {
        match value {
            StrokeBasis::NetStrokes => ScoringBasis::NetStrokes,
            StrokeBasis::GrossStrokes => ScoringBasis::GrossStrokes,
        }
    }
}

fn default_points_per_win() -> f64 {
    1.0
}

fn default_points_per_half() -> f64 {
    0.5
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StablefordConfig {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StrokePlayConfig {
    #[serde(default)]
    pub scoring_basis: StrokeBasis,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerPairing {
    pub player_a: ParticipantId,
    pub player_b: ParticipantId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchPlayConfig {
    #[serde(default = "default_points_per_win")]
    pub points_per_win: f64,
    #[serde(default = "default_points_per_half")]
    pub points_per_half: f64,
    #[serde(default)]
    pub pairings: Vec<PlayerPairing>,
}

impl Default for MatchPlayConfig {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            points_per_half: default_points_per_half(),
            pairings: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamPairing {
    pub team_a: TeamId,
    pub team_b: TeamId,
}

/// Shared by best ball and hi-lo.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeamMatchConfig {
    #[serde(default = "default_points_per_win")]
    pub points_per_win: f64,
    #[serde(default = "default_points_per_half")]
    pub points_per_half: f64,
    #[serde(default)]
    pub pairings: Vec<TeamPairing>,
}

impl Default for TeamMatchConfig {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            points_per_half: default_points_per_half(),
            pairings: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RumbleCounting {
    /// 1 score on holes 1-6, 2 on 7-12, 3 on 13-17, every score from 18.
    #[default]
    Progressive,
    BestBall,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RumbleConfig {
    #[serde(default = "default_points_per_win")]
    pub points_per_win: f64,
    #[serde(default)]
    pub counting: RumbleCounting,
}

impl Default for RumbleConfig {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            counting: RumbleCounting::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SixPointBasis {
    #[default]
    Net,
    Stableford,
    Gross,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct SixPointConfig {
    #[serde(default)]
    pub scoring_basis: SixPointBasis,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ChairConfig {}

fn default_partner_win_points() -> f64 {
    2.0
}

fn default_lone_win_points() -> f64 {
    4.0
}

fn default_opponent_win_points() -> f64 {
    2.0
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WolfConfig {
    #[serde(default = "default_partner_win_points")]
    pub partner_win_points: f64,
    #[serde(default = "default_lone_win_points")]
    pub lone_win_points: f64,
    #[serde(default = "default_opponent_win_points")]
    pub opponent_win_points: f64,
}

impl Default for WolfConfig {
    fn default() -> Self {
        Self {
            partner_win_points: default_partner_win_points(),
            lone_win_points: default_lone_win_points(),
            opponent_win_points: default_opponent_win_points(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BonusMode {
    /// Badge only.
    #[default]
    Standalone,
    /// Adds `bonus_points` to the player's total.
    Contributor,
}

fn default_bonus_points() -> i32 {
    1
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BonusConfig {
    #[serde(default)]
    pub hole_number: Option<u32>,
    #[serde(default)]
    pub bonus_mode: BonusMode,
    #[serde(default = "default_bonus_points")]
    pub bonus_points: i32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            hole_number: None,
            bonus_mode: BonusMode::default(),
            bonus_points: default_bonus_points(),
        }
    }
}

/// Typed view of a competition's `config_json`.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "format_type", content = "config", rename_all = "snake_case")]
pub enum CompetitionConfig {
    Stableford(StablefordConfig),
    StrokePlay(StrokePlayConfig),
    MatchPlay(MatchPlayConfig),
    BestBall(TeamMatchConfig),
    HiLo(TeamMatchConfig),
    Rumble(RumbleConfig),
    SixPoint(SixPointConfig),
    Chair(ChairConfig),
    Wolf(WolfConfig),
    NearestPin(BonusConfig),
    LongestDrive(BonusConfig),
}

fn parse_config<T: DeserializeOwned + Default>(competition: &Competition) -> Result<T> {
    if competition.config_json.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(competition.config_json.clone()).map_err(|e| {
        ScoringError::InvalidCompetitionConfig {
            competition_id: competition.id.clone(),
            reason: e.to_string(),
        }
    })
}

impl CompetitionConfig {
    /// Parse the competition's format type and config json.
    ///
    /// # Errors
    /// `UnknownFormatType` for an unrecognised format, `InvalidCompetitionConfig` when the json
    /// does not match the format's config shape.
    pub fn from_competition(competition: &Competition) -> Result<Self> {
        let format_type: FormatType = competition.format_type.parse()?;
        let config = match format_type {
            FormatType::Stableford => CompetitionConfig::Stableford(parse_config(competition)?),
            FormatType::StrokePlay => CompetitionConfig::StrokePlay(parse_config(competition)?),
            FormatType::MatchPlay => CompetitionConfig::MatchPlay(parse_config(competition)?),
            FormatType::BestBall => CompetitionConfig::BestBall(parse_config(competition)?),
            FormatType::HiLo => CompetitionConfig::HiLo(parse_config(competition)?),
            FormatType::Rumble => CompetitionConfig::Rumble(parse_config(competition)?),
            FormatType::SixPoint => CompetitionConfig::SixPoint(parse_config(competition)?),
            FormatType::Chair => CompetitionConfig::Chair(parse_config(competition)?),
            FormatType::Wolf => CompetitionConfig::Wolf(parse_config(competition)?),
            FormatType::NearestPin | FormatType::LongestDrive => {
                let mut bonus: BonusConfig = parse_config(competition)?;
                if bonus.hole_number.is_none() {
                    bonus.hole_number = competition.hole_number;
                }
                if bonus.hole_number.is_none() {
                    return Err(ScoringError::InvalidCompetitionConfig {
                        competition_id: competition.id.clone(),
                        reason: "bonus competition has no hole number".to_string(),
                    });
                }
                if format_type == FormatType::NearestPin {
                    CompetitionConfig::NearestPin(bonus)
                } else {
                    CompetitionConfig::LongestDrive(bonus)
                }
            }
        };
        Ok(config)
    }

    #[must_use]
    pub fn format_type(&self) -> FormatType {
        match self {
            CompetitionConfig::Stableford(_) => FormatType::Stableford,
            CompetitionConfig::StrokePlay(_) => FormatType::StrokePlay,
            CompetitionConfig::MatchPlay(_) => FormatType::MatchPlay,
            CompetitionConfig::BestBall(_) => FormatType::BestBall,
            CompetitionConfig::HiLo(_) => FormatType::HiLo,
            CompetitionConfig::Rumble(_) => FormatType::Rumble,
            CompetitionConfig::SixPoint(_) => FormatType::SixPoint,
            CompetitionConfig::Chair(_) => FormatType::Chair,
            CompetitionConfig::Wolf(_) => FormatType::Wolf,
            CompetitionConfig::NearestPin(_) => FormatType::NearestPin,
            CompetitionConfig::LongestDrive(_) => FormatType::LongestDrive,
        }
    }

    #[must_use]
    pub fn bonus(&self) -> Option<&BonusConfig> {
        match self {
            CompetitionConfig::NearestPin(b) | CompetitionConfig::LongestDrive(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LowestStrokesConfig {
    #[serde(default)]
    pub scoring_basis: StrokeBasis,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchWinsConfig {
    #[serde(default = "default_points_per_win")]
    pub points_per_win: f64,
    #[serde(default = "default_points_per_half")]
    pub points_per_half: f64,
}

impl Default for MatchWinsConfig {
    fn default() -> Self {
        Self {
            points_per_win: default_points_per_win(),
            points_per_half: default_points_per_half(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AggregationMethod {
    SumStableford,
    LowestStrokes(LowestStrokesConfig),
    MatchWins(MatchWinsConfig),
}

impl AggregationMethod {
    /// # Errors
    /// `UnknownAggregationMethod` for an unrecognised method or a malformed method config.
    pub fn parse(method: &str, config: Option<&serde_json::Value>) -> Result<Self> {
        fn typed<T: DeserializeOwned + Default>(
            method: &str,
            config: Option<&serde_json::Value>,
        ) -> Result<T> {
            match config {
                None | Some(serde_json::Value::Null) => Ok(T::default()),
                Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                    ScoringError::UnknownAggregationMethod(format!("{method}: {e}"))
                }),
            }
        }

        match method {
            "sum_stableford" => Ok(AggregationMethod::SumStableford),
            "lowest_strokes" => Ok(AggregationMethod::LowestStrokes(typed(method, config)?)),
            "match_wins" => Ok(AggregationMethod::MatchWins(typed(method, config)?)),
            other => Err(ScoringError::UnknownAggregationMethod(other.to_string())),
        }
    }

    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        match self {
            AggregationMethod::LowestStrokes(_) => SortDirection::Asc,
            AggregationMethod::SumStableford | AggregationMethod::MatchWins(_) => {
                SortDirection::Desc
            }
        }
    }
}
