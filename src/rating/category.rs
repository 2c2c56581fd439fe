//! Rating category classification
//!
//! Maps a rating value onto a skill category via fixed, contiguous,
//! half-open integer bands. The bands live in a table rather than a branch
//! chain so alternative band sets can be swapped in later.

use crate::types::{Rating, RatingCategory};

/// Band floors in descending order. A rating belongs to the first band whose
/// floor it reaches; boundary values belong to the upper band. Anything below
/// the lowest floor classifies as Beginner, including out-of-range values
/// (range enforcement is a separate check, see [`super::validation`]).
const BANDS: [(Rating, RatingCategory); 4] = [
    (2400, RatingCategory::Master),
    (2200, RatingCategory::Expert),
    (1800, RatingCategory::Advanced),
    (1200, RatingCategory::Intermediate),
];

/// Classify a rating into its skill category. Total over all integers.
pub fn classify_rating(rating: Rating) -> RatingCategory {
    BANDS
        .iter()
        .find(|(floor, _)| rating >= *floor)
        .map(|(_, category)| *category)
        .unwrap_or(RatingCategory::Beginner)
}

/// Inclusive lower bound of the band a category covers
pub fn band_floor(category: RatingCategory) -> Rating {
    BANDS
        .iter()
        .find(|(_, c)| *c == category)
        .map(|(floor, _)| *floor)
        .unwrap_or(super::validation::MIN_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify_rating(1199), RatingCategory::Beginner);
        assert_eq!(classify_rating(1200), RatingCategory::Intermediate);
        assert_eq!(classify_rating(1799), RatingCategory::Intermediate);
        assert_eq!(classify_rating(1800), RatingCategory::Advanced);
        assert_eq!(classify_rating(2199), RatingCategory::Advanced);
        assert_eq!(classify_rating(2200), RatingCategory::Expert);
        assert_eq!(classify_rating(2399), RatingCategory::Expert);
        assert_eq!(classify_rating(2400), RatingCategory::Master);
    }

    #[test]
    fn test_range_endpoints() {
        assert_eq!(classify_rating(100), RatingCategory::Beginner);
        assert_eq!(classify_rating(4000), RatingCategory::Master);
    }

    #[test]
    fn test_out_of_range_values_still_classify() {
        // Same band rule; no rejection here
        assert_eq!(classify_rating(0), RatingCategory::Beginner);
        assert_eq!(classify_rating(-50), RatingCategory::Beginner);
        assert_eq!(classify_rating(9000), RatingCategory::Master);
    }

    #[test]
    fn test_band_floors() {
        assert_eq!(band_floor(RatingCategory::Beginner), 100);
        assert_eq!(band_floor(RatingCategory::Intermediate), 1200);
        assert_eq!(band_floor(RatingCategory::Master), 2400);
    }
}
