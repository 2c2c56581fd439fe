//! Rating system configuration

use crate::rating::elo::{INITIAL_RATING, K_FACTOR};
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Tunable rating parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Scaling applied to rating changes
    pub k_factor: f64,
    /// Rating assigned to new players
    pub initial_rating: Rating,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            initial_rating: INITIAL_RATING,
        }
    }
}

impl From<&RatingSettings> for crate::rating::EloConfig {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            k_factor: settings.k_factor,
            initial_rating: settings.initial_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::EloConfig;

    #[test]
    fn test_settings_bridge_to_elo_config() {
        let settings = RatingSettings {
            k_factor: 24.0,
            initial_rating: 1200,
        };
        let config = EloConfig::from(&settings);
        assert_eq!(config.k_factor, 24.0);
        assert_eq!(config.initial_rating, 1200);
        assert!(config.validate().is_ok());
    }
}
