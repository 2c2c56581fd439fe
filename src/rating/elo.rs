//! Elo rating system implementation
//!
//! This module provides the core rating mathematics: the logistic
//! expected-score curve (delegated to the skillratings crate) and the
//! fixed-K rating change, rounded to a signed integer. It also provides
//! the concrete [`RatingCalculator`] built on top of them.

use crate::rating::calculator::RatingCalculator;
use crate::rating::category::classify_rating;
use crate::rating::validation::rating_in_bounds;
use crate::types::{MatchOutcome, Rating, RatingChange, RatingScenarios};
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score as elo_expected_score, EloRating};

/// K-factor applied to every player; no provisional or band-dependent K
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned to players who have not played yet
pub const INITIAL_RATING: Rating = 1500;

/// Expected score for a player against an opponent: the probability-of-win
/// estimate `1 / (1 + 10^((opponent - player) / 400))`. Always in (0, 1).
pub fn expected_score(player_rating: Rating, opponent_rating: Rating) -> f64 {
    let (expected, _) = elo_expected_score(
        &EloRating {
            rating: player_rating as f64,
        },
        &EloRating {
            rating: opponent_rating as f64,
        },
    );
    expected
}

/// Signed rating change for a player given a match score (1.0 win, 0.5 draw,
/// 0.0 loss). Total over all numeric inputs; callers are expected to have
/// validated the ratings separately. Halves round away from zero.
pub fn rating_change(player_rating: Rating, opponent_rating: Rating, score: f64) -> i32 {
    rating_change_with_k(player_rating, opponent_rating, score, K_FACTOR)
}

fn rating_change_with_k(
    player_rating: Rating,
    opponent_rating: Rating,
    score: f64,
    k_factor: f64,
) -> i32 {
    let expected = expected_score(player_rating, opponent_rating);
    (k_factor * (score - expected)).round() as i32
}

/// Configuration for the Elo rating system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    /// Scaling applied to the difference between actual and expected score
    pub k_factor: f64,
    /// Rating assigned to new players
    pub initial_rating: Rating,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            initial_rating: INITIAL_RATING,
        }
    }
}

impl EloConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            k_factor: 16.0,
            initial_rating: INITIAL_RATING,
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            k_factor: 40.0,
            initial_rating: INITIAL_RATING,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !rating_in_bounds(self.initial_rating) {
            return Err(crate::error::RatingError::ConfigurationError {
                message: format!("Initial rating out of range: {}", self.initial_rating),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Rating change under this calculator's K-factor for a raw match score
    pub fn change_for_score(
        &self,
        player_rating: Rating,
        opponent_rating: Rating,
        score: f64,
    ) -> i32 {
        rating_change_with_k(player_rating, opponent_rating, score, self.config.k_factor)
    }

    /// Possible deltas for a pairing at each outcome, before the match
    pub fn scenarios(&self, player_rating: Rating, opponent_rating: Rating) -> RatingScenarios {
        RatingScenarios {
            win: self.change_for_score(player_rating, opponent_rating, 1.0),
            draw: self.change_for_score(player_rating, opponent_rating, 0.5),
            loss: self.change_for_score(player_rating, opponent_rating, 0.0),
        }
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: EloConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_rating_change(
        &self,
        player_rating: Rating,
        opponent_rating: Rating,
        outcome: MatchOutcome,
    ) -> crate::error::Result<RatingChange> {
        let delta = self.change_for_score(player_rating, opponent_rating, outcome.score());
        let new_rating = player_rating + delta;

        Ok(RatingChange {
            old_rating: player_rating,
            new_rating,
            delta,
            outcome,
            old_category: classify_rating(player_rating),
            new_category: classify_rating(new_rating),
        })
    }

    fn initial_rating(&self) -> Rating {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: EloConfig = serde_json::from_value(config).map_err(|e| {
            crate::error::RatingError::ConfigurationError {
                message: format!("Invalid Elo configuration: {}", e),
            }
        })?;

        new_config.validate()?;
        self.config = new_config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingCategory;

    #[test]
    fn test_expected_score_equal_ratings() {
        let expected = expected_score(1500, 1500);
        assert!((expected - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_expected_score_rating_gap() {
        // 200 points below the opponent: E = 1 / (1 + 10^0.5)
        let expected = expected_score(800, 1000);
        assert!((expected - 0.2403).abs() < 0.001);

        // Symmetric from the opponent's side
        let opposite = expected_score(1000, 800);
        assert!((expected + opposite - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_ratings_change() {
        assert_eq!(rating_change(1500, 1500, 1.0), 16);
        assert_eq!(rating_change(1500, 1500, 0.0), -16);
        assert_eq!(rating_change(1500, 1500, 0.5), 0);
    }

    #[test]
    fn test_underdog_win_exceeds_even_gain() {
        assert!(rating_change(1400, 1600, 1.0) > 16);
    }

    #[test]
    fn test_favorite_loss_below_even_magnitude() {
        // Losing as the underdog costs less than losing an even match
        assert!(rating_change(1400, 1600, 0.0) > -16);
    }

    #[test]
    fn test_underdog_loss_exact_value() {
        // E ≈ 0.2403, delta = 32 * (0 - 0.2403) ≈ -7.69, rounds to -8
        assert_eq!(rating_change(800, 1000, 0.0), -8);
    }

    #[test]
    fn test_extreme_gap_saturates() {
        // Expected score approaches 1; a win moves almost nothing
        let change = rating_change(4000, 100, 1.0);
        assert_eq!(change, 0);

        // An upset at the same gap is worth nearly the whole K
        let upset = rating_change(100, 4000, 1.0);
        assert_eq!(upset, 32);
    }

    #[test]
    fn test_config_validation() {
        assert!(EloConfig::default().validate().is_ok());
        assert!(EloConfig::conservative().validate().is_ok());
        assert!(EloConfig::aggressive().validate().is_ok());

        let mut config = EloConfig::default();
        config.k_factor = 0.0;
        assert!(config.validate().is_err());

        config = EloConfig::default();
        config.k_factor = -5.0;
        assert!(config.validate().is_err());

        config = EloConfig::default();
        config.initial_rating = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_calculator_change_includes_categories() {
        let calculator = EloRatingCalculator::default();

        let change = calculator
            .calculate_rating_change(1500, 1500, MatchOutcome::Win)
            .unwrap();

        assert_eq!(change.old_rating, 1500);
        assert_eq!(change.delta, 16);
        assert_eq!(change.new_rating, 1516);
        assert_eq!(change.old_category, RatingCategory::Intermediate);
        assert_eq!(change.new_category, RatingCategory::Intermediate);
    }

    #[test]
    fn test_calculator_change_crosses_band() {
        let calculator = EloRatingCalculator::default();

        let change = calculator
            .calculate_rating_change(1790, 1790, MatchOutcome::Win)
            .unwrap();

        assert_eq!(change.new_rating, 1806);
        assert_eq!(change.old_category, RatingCategory::Intermediate);
        assert_eq!(change.new_category, RatingCategory::Advanced);
    }

    #[test]
    fn test_scenarios_table() {
        let calculator = EloRatingCalculator::default();

        let scenarios = calculator.scenarios(1500, 1500);
        assert_eq!(scenarios.win, 16);
        assert_eq!(scenarios.draw, 0);
        assert_eq!(scenarios.loss, -16);
        assert_eq!(scenarios.max_gain(), 16);
        assert_eq!(scenarios.max_loss(), -16);
    }

    #[test]
    fn test_k_factor_scaling() {
        let conservative = EloRatingCalculator::new(EloConfig::conservative()).unwrap();
        let aggressive = EloRatingCalculator::new(EloConfig::aggressive()).unwrap();

        assert_eq!(conservative.change_for_score(1500, 1500, 1.0), 8);
        assert_eq!(aggressive.change_for_score(1500, 1500, 1.0), 20);
    }

    #[test]
    fn test_config_round_trip() {
        let mut calculator = EloRatingCalculator::default();
        assert_eq!(calculator.initial_rating(), INITIAL_RATING);

        let new_config = serde_json::json!({
            "k_factor": 24.0,
            "initial_rating": 1200
        });
        calculator.update_config(new_config).unwrap();

        assert_eq!(calculator.initial_rating(), 1200);
        assert_eq!(calculator.change_for_score(1500, 1500, 1.0), 12);
    }

    #[test]
    fn test_update_config_rejects_invalid() {
        let mut calculator = EloRatingCalculator::default();

        let bad_k = serde_json::json!({ "k_factor": -1.0, "initial_rating": 1500 });
        assert!(calculator.update_config(bad_k).is_err());

        let bad_shape = serde_json::json!({ "k_factor": "thirty-two" });
        assert!(calculator.update_config(bad_shape).is_err());

        // Config is unchanged after rejected updates
        assert_eq!(calculator.change_for_score(1500, 1500, 1.0), 16);
    }
}
