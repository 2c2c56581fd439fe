//! Utility functions for the rating engine

use crate::types::Rating;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: Rating, rating2: Rating) -> u32 {
    rating1.abs_diff(rating2)
}

/// Check if two ratings are within the given tolerance
pub fn ratings_within_tolerance(rating1: Rating, rating2: Rating, tolerance: u32) -> bool {
    rating_difference(rating1, rating2) <= tolerance
}
