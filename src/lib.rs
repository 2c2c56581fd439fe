//! Podium - Elo rating engine for tournament skill tracking
//!
//! This crate provides Elo rating-change calculation, rating-category
//! classification, and rating validation, plus configuration and an
//! in-memory player record store around the pure numeric core.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{
    classify_rating, expected_score, is_valid_rating, rating_change, EloConfig,
    EloRatingCalculator, InMemoryRatingStorage, RatingCalculator, RatingStorage,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
