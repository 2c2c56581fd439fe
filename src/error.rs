//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. The pure rating computations never fail; these errors
//! cover the seams around them (configuration, storage, lookups).

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Rating out of range: {value}")]
    RatingOutOfRange { value: i32 },

    #[error("Invalid match result: {reason}")]
    InvalidMatchResult { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal engine error: {message}")]
    InternalError { message: String },
}
