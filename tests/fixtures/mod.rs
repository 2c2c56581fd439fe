//! Test fixtures shared by the integration tests

use podium::rating::{EloRatingCalculator, InMemoryRatingStorage, RatingEntry, RatingStorage};
use podium::types::{PlayerId, Rating};

/// Build a storage pre-seeded with the given players
pub fn seeded_storage(players: &[(&str, Rating)]) -> InMemoryRatingStorage {
    let storage = InMemoryRatingStorage::default();
    for (id, rating) in players {
        storage
            .store_rating(RatingEntry::new(id.to_string(), *rating))
            .unwrap();
    }
    storage
}

/// Default calculator used across the integration tests
pub fn test_calculator() -> EloRatingCalculator {
    EloRatingCalculator::default()
}

/// Convenience for owned player ids
pub fn player_id(id: &str) -> PlayerId {
    id.to_string()
}
