//! Rating calculator trait and implementations
//!
//! This module defines the interface for rating calculations and provides
//! basic implementations for testing and fallback. The real Elo calculator
//! lives in [`super::elo`].

use crate::rating::category::classify_rating;
use crate::types::{MatchOutcome, Rating, RatingChange};

/// Trait for calculating rating changes after matches
pub trait RatingCalculator: Send + Sync {
    /// Calculate the rating change for a player against an opponent
    ///
    /// # Arguments
    /// * `player_rating` - the rated player's current rating
    /// * `opponent_rating` - the opponent's current rating
    /// * `outcome` - the match result from the player's perspective
    ///
    /// # Returns
    /// The full change record, including old/new categories
    fn calculate_rating_change(
        &self,
        player_rating: Rating,
        opponent_rating: Rating,
        outcome: MatchOutcome,
    ) -> crate::error::Result<RatingChange>;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> Rating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Simple rating calculator for testing or fallback; ratings never move
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_rating: Rating,
}

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new(initial_rating: Rating) -> Self {
        Self { initial_rating }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(super::elo::INITIAL_RATING)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn calculate_rating_change(
        &self,
        player_rating: Rating,
        _opponent_rating: Rating,
        outcome: MatchOutcome,
    ) -> crate::error::Result<RatingChange> {
        let category = classify_rating(player_rating);

        Ok(RatingChange {
            old_rating: player_rating,
            new_rating: player_rating,
            delta: 0,
            outcome,
            old_category: category,
            new_category: category,
        })
    }

    fn initial_rating(&self) -> Rating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_rating": self.initial_rating
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_i64()) {
            self.initial_rating = rating as Rating;
        }
        Ok(())
    }
}

/// Mock rating calculator for testing
#[derive(Debug, Default)]
pub struct MockRatingCalculator {
    calculation_calls: std::sync::Mutex<Vec<(Rating, Rating, MatchOutcome)>>,
    fixed_result: std::sync::RwLock<Option<RatingChange>>,
    initial_rating: Rating,
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self {
            calculation_calls: std::sync::Mutex::new(Vec::new()),
            fixed_result: std::sync::RwLock::new(None),
            initial_rating: super::elo::INITIAL_RATING,
        }
    }

    /// Set a fixed result to return for all calculations
    pub fn set_fixed_result(&self, result: RatingChange) {
        if let Ok(mut fixed) = self.fixed_result.write() {
            *fixed = Some(result);
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calculation_calls(&self) -> Vec<(Rating, Rating, MatchOutcome)> {
        self.calculation_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.clear();
        }
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn calculate_rating_change(
        &self,
        player_rating: Rating,
        opponent_rating: Rating,
        outcome: MatchOutcome,
    ) -> crate::error::Result<RatingChange> {
        // Record the call
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.push((player_rating, opponent_rating, outcome));
        }

        // Return fixed result if set, otherwise no change
        if let Ok(fixed) = self.fixed_result.read() {
            if let Some(result) = fixed.as_ref() {
                return Ok(result.clone());
            }
        }

        let category = classify_rating(player_rating);
        Ok(RatingChange {
            old_rating: player_rating,
            new_rating: player_rating,
            delta: 0,
            outcome,
            old_category: category,
            new_category: category,
        })
    }

    fn initial_rating(&self) -> Rating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "initial_rating": self.initial_rating
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_i64()) {
            self.initial_rating = rating as Rating;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingCategory;

    #[test]
    fn test_noop_calculator() {
        let calculator = NoOpRatingCalculator::default();

        let change = calculator
            .calculate_rating_change(1500, 1600, MatchOutcome::Win)
            .unwrap();

        assert_eq!(change.old_rating, 1500);
        assert_eq!(change.new_rating, 1500);
        assert_eq!(change.delta, 0);
        assert_eq!(change.old_category, RatingCategory::Intermediate);
    }

    #[test]
    fn test_noop_calculator_config() {
        let mut calculator = NoOpRatingCalculator::default();
        assert_eq!(calculator.initial_rating(), 1500);

        let new_config = serde_json::json!({ "initial_rating": 1200 });
        calculator.update_config(new_config).unwrap();

        assert_eq!(calculator.initial_rating(), 1200);
    }

    #[test]
    fn test_mock_calculator_records_calls() {
        let calculator = MockRatingCalculator::new();

        calculator
            .calculate_rating_change(1500, 1600, MatchOutcome::Loss)
            .unwrap();
        calculator
            .calculate_rating_change(1600, 1500, MatchOutcome::Win)
            .unwrap();

        let calls = calculator.get_calculation_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (1500, 1600, MatchOutcome::Loss));
        assert_eq!(calls[1], (1600, 1500, MatchOutcome::Win));

        calculator.clear_calls();
        assert!(calculator.get_calculation_calls().is_empty());
    }

    #[test]
    fn test_mock_calculator_fixed_result() {
        let calculator = MockRatingCalculator::new();

        let fixed = RatingChange {
            old_rating: 1500,
            new_rating: 1516,
            delta: 16,
            outcome: MatchOutcome::Win,
            old_category: RatingCategory::Intermediate,
            new_category: RatingCategory::Intermediate,
        };
        calculator.set_fixed_result(fixed.clone());

        let change = calculator
            .calculate_rating_change(800, 900, MatchOutcome::Draw)
            .unwrap();

        assert_eq!(change.delta, 16);
        assert_eq!(change.new_rating, 1516);
    }
}
