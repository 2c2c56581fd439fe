//! Common types used throughout the rating engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillratings::Outcomes;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for recorded matches
pub type MatchId = Uuid;

/// A player's skill estimate. Valid ratings are integers in [100, 4000];
/// see [`crate::rating::validation`].
pub type Rating = i32;

/// Outcome of a match from the perspective of the rated player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Match score used by the Elo formula: 1.0 win, 0.5 draw, 0.0 loss
    pub fn score(self) -> f64 {
        match self {
            MatchOutcome::Win => 1.0,
            MatchOutcome::Draw => 0.5,
            MatchOutcome::Loss => 0.0,
        }
    }

    /// Outcome as seen from the other side of the board
    pub fn inverted(self) -> Self {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Draw => MatchOutcome::Draw,
            MatchOutcome::Loss => MatchOutcome::Win,
        }
    }

    /// Map a raw score back to an outcome, if it is one of the three
    /// meaningful values
    pub fn from_score(score: f64) -> Option<Self> {
        if score == 1.0 {
            Some(MatchOutcome::Win)
        } else if score == 0.5 {
            Some(MatchOutcome::Draw)
        } else if score == 0.0 {
            Some(MatchOutcome::Loss)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "Win"),
            MatchOutcome::Draw => write!(f, "Draw"),
            MatchOutcome::Loss => write!(f, "Loss"),
        }
    }
}

impl From<MatchOutcome> for Outcomes {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Win => Outcomes::WIN,
            MatchOutcome::Draw => Outcomes::DRAW,
            MatchOutcome::Loss => Outcomes::LOSS,
        }
    }
}

/// Skill category derived from a rating value via fixed bands;
/// see [`crate::rating::category`]. Categories order by band, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl std::fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingCategory::Beginner => write!(f, "Beginner"),
            RatingCategory::Intermediate => write!(f, "Intermediate"),
            RatingCategory::Advanced => write!(f, "Advanced"),
            RatingCategory::Expert => write!(f, "Expert"),
            RatingCategory::Master => write!(f, "Master"),
        }
    }
}

/// Rating change information for one player after one recorded outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: Rating,
    pub new_rating: Rating,
    /// Signed amount added to the player's rating
    pub delta: i32,
    pub outcome: MatchOutcome,
    pub old_category: RatingCategory,
    pub new_category: RatingCategory,
}

/// Possible rating deltas for a pairing at each outcome, computed
/// before the match is played
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingScenarios {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl RatingScenarios {
    /// Largest possible gain for the pairing
    pub fn max_gain(&self) -> i32 {
        self.win.max(self.draw).max(self.loss)
    }

    /// Largest possible loss for the pairing (as a non-positive delta)
    pub fn max_loss(&self) -> i32 {
        self.win.min(self.draw).min(self.loss)
    }
}

/// Record of a single rated match between two players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub opponent_id: PlayerId,
    pub change: RatingChange,
    pub recorded_at: DateTime<Utc>,
}
