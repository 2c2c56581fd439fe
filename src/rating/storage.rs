//! Rating storage interface and implementations
//!
//! This module defines the interface for keeping player rating records,
//! with an in-memory implementation. Player state lives here, never in the
//! pure calculation functions.

use crate::rating::category::classify_rating;
use crate::rating::validation::rating_in_bounds;
use crate::types::{PlayerId, Rating, RatingCategory, RatingChange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Storage entry for a player's rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub player_id: PlayerId,
    pub rating: Rating,
    pub peak_rating: Rating,
    pub games_played: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry for a new player
    pub fn new(player_id: PlayerId, initial_rating: Rating) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            rating: initial_rating,
            peak_rating: initial_rating,
            games_played: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Apply a computed rating change and increment games played
    pub fn apply_change(&mut self, change: &RatingChange) {
        self.rating = change.new_rating;
        self.peak_rating = self.peak_rating.max(change.new_rating);
        self.games_played += 1;
        self.last_updated = Utc::now();
    }

    /// Skill category for the entry's current rating
    pub fn category(&self) -> RatingCategory {
        classify_rating(self.rating)
    }
}

/// Trait for rating storage operations
pub trait RatingStorage: Send + Sync {
    /// Get a player's rating entry
    fn get_rating(&self, player_id: &PlayerId) -> crate::error::Result<Option<RatingEntry>>;

    /// Store or update a player's rating. Entries with out-of-range ratings
    /// are rejected.
    fn store_rating(&self, entry: RatingEntry) -> crate::error::Result<()>;

    /// Get ratings for multiple players
    fn get_ratings(
        &self,
        player_ids: &[PlayerId],
    ) -> crate::error::Result<HashMap<PlayerId, RatingEntry>>;

    /// Store multiple rating updates together
    fn store_ratings(&self, entries: Vec<RatingEntry>) -> crate::error::Result<()>;

    /// Get all players with ratings (for admin/debugging)
    fn get_all_ratings(&self) -> crate::error::Result<HashMap<PlayerId, RatingEntry>>;

    /// Remove a player's rating
    fn remove_rating(&self, player_id: &PlayerId) -> crate::error::Result<bool>;

    /// Get players by rating range, sorted by rating descending
    fn get_players_by_rating_range(
        &self,
        min_rating: Rating,
        max_rating: Rating,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<RatingEntry>>;

    /// Get players whose current rating falls in a category band
    fn get_players_by_category(
        &self,
        category: RatingCategory,
    ) -> crate::error::Result<Vec<RatingEntry>>;

    /// Get total number of rated players
    fn get_player_count(&self) -> crate::error::Result<usize>;
}

/// In-memory rating storage implementation
#[derive(Debug)]
pub struct InMemoryRatingStorage {
    ratings: RwLock<HashMap<PlayerId, RatingEntry>>,
    max_entries: usize,
}

impl InMemoryRatingStorage {
    /// Create a new in-memory rating storage
    pub fn new(max_entries: usize) -> Self {
        Self {
            ratings: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// Cleanup old entries if we exceed max_entries
    fn cleanup_if_needed(&self) -> crate::error::Result<()> {
        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        if ratings.len() > self.max_entries {
            // Remove oldest entries (by last_updated timestamp)
            let mut entries: Vec<_> = ratings
                .iter()
                .map(|(k, v)| (k.clone(), v.last_updated))
                .collect();
            entries.sort_by(|a, b| a.1.cmp(&b.1));

            let to_remove = ratings.len() - self.max_entries;
            debug!("Evicting {} stale rating entries", to_remove);
            for (player_id, _) in entries.into_iter().take(to_remove) {
                ratings.remove(&player_id);
            }
        }

        Ok(())
    }

    fn validate_entry(entry: &RatingEntry) -> crate::error::Result<()> {
        if !rating_in_bounds(entry.rating) {
            return Err(crate::error::RatingError::RatingOutOfRange {
                value: entry.rating,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for InMemoryRatingStorage {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn get_rating(&self, player_id: &PlayerId) -> crate::error::Result<Option<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.get(player_id).cloned())
    }

    fn store_rating(&self, entry: RatingEntry) -> crate::error::Result<()> {
        Self::validate_entry(&entry)?;

        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        ratings.insert(entry.player_id.clone(), entry);

        drop(ratings); // Release lock before cleanup
        self.cleanup_if_needed()?;

        Ok(())
    }

    fn get_ratings(
        &self,
        player_ids: &[PlayerId],
    ) -> crate::error::Result<HashMap<PlayerId, RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut result = HashMap::new();
        for player_id in player_ids {
            if let Some(entry) = ratings.get(player_id) {
                result.insert(player_id.clone(), entry.clone());
            }
        }

        Ok(result)
    }

    fn store_ratings(&self, entries: Vec<RatingEntry>) -> crate::error::Result<()> {
        for entry in &entries {
            Self::validate_entry(entry)?;
        }

        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        for entry in entries {
            ratings.insert(entry.player_id.clone(), entry);
        }

        drop(ratings); // Release lock before cleanup
        self.cleanup_if_needed()?;

        Ok(())
    }

    fn get_all_ratings(&self) -> crate::error::Result<HashMap<PlayerId, RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.clone())
    }

    fn remove_rating(&self, player_id: &PlayerId) -> crate::error::Result<bool> {
        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        Ok(ratings.remove(player_id).is_some())
    }

    fn get_players_by_rating_range(
        &self,
        min_rating: Rating,
        max_rating: Rating,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut matching_entries: Vec<RatingEntry> = ratings
            .values()
            .filter(|entry| entry.rating >= min_rating && entry.rating <= max_rating)
            .cloned()
            .collect();

        // Sort by rating (descending)
        matching_entries.sort_by(|a, b| b.rating.cmp(&a.rating));

        if let Some(limit) = limit {
            matching_entries.truncate(limit);
        }

        Ok(matching_entries)
    }

    fn get_players_by_category(
        &self,
        category: RatingCategory,
    ) -> crate::error::Result<Vec<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut matching_entries: Vec<RatingEntry> = ratings
            .values()
            .filter(|entry| entry.category() == category)
            .cloned()
            .collect();

        matching_entries.sort_by(|a, b| b.rating.cmp(&a.rating));

        Ok(matching_entries)
    }

    fn get_player_count(&self) -> crate::error::Result<usize> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.len())
    }
}

/// Mock rating storage for testing
#[derive(Debug, Default)]
pub struct MockRatingStorage {
    ratings: RwLock<HashMap<PlayerId, RatingEntry>>,
    store_calls: RwLock<Vec<RatingEntry>>,
}

impl MockRatingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all store calls made (for testing)
    pub fn get_store_calls(&self) -> Vec<RatingEntry> {
        self.store_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear store calls (for testing)
    pub fn clear_store_calls(&self) {
        if let Ok(mut calls) = self.store_calls.write() {
            calls.clear();
        }
    }

    /// Preset ratings for testing
    pub fn preset_ratings(
        &self,
        ratings: HashMap<PlayerId, RatingEntry>,
    ) -> crate::error::Result<()> {
        let mut storage =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        *storage = ratings;
        Ok(())
    }
}

impl RatingStorage for MockRatingStorage {
    fn get_rating(&self, player_id: &PlayerId) -> crate::error::Result<Option<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.get(player_id).cloned())
    }

    fn store_rating(&self, entry: RatingEntry) -> crate::error::Result<()> {
        // Record the call for testing
        if let Ok(mut calls) = self.store_calls.write() {
            calls.push(entry.clone());
        }

        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        ratings.insert(entry.player_id.clone(), entry);
        Ok(())
    }

    fn get_ratings(
        &self,
        player_ids: &[PlayerId],
    ) -> crate::error::Result<HashMap<PlayerId, RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut result = HashMap::new();
        for player_id in player_ids {
            if let Some(entry) = ratings.get(player_id) {
                result.insert(player_id.clone(), entry.clone());
            }
        }

        Ok(result)
    }

    fn store_ratings(&self, entries: Vec<RatingEntry>) -> crate::error::Result<()> {
        // Record the calls for testing
        if let Ok(mut calls) = self.store_calls.write() {
            calls.extend(entries.clone());
        }

        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        for entry in entries {
            ratings.insert(entry.player_id.clone(), entry);
        }

        Ok(())
    }

    fn get_all_ratings(&self) -> crate::error::Result<HashMap<PlayerId, RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.clone())
    }

    fn remove_rating(&self, player_id: &PlayerId) -> crate::error::Result<bool> {
        let mut ratings =
            self.ratings
                .write()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings write lock".to_string(),
                })?;

        Ok(ratings.remove(player_id).is_some())
    }

    fn get_players_by_rating_range(
        &self,
        min_rating: Rating,
        max_rating: Rating,
        limit: Option<usize>,
    ) -> crate::error::Result<Vec<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut matching_entries: Vec<RatingEntry> = ratings
            .values()
            .filter(|entry| entry.rating >= min_rating && entry.rating <= max_rating)
            .cloned()
            .collect();

        matching_entries.sort_by(|a, b| b.rating.cmp(&a.rating));

        if let Some(limit) = limit {
            matching_entries.truncate(limit);
        }

        Ok(matching_entries)
    }

    fn get_players_by_category(
        &self,
        category: RatingCategory,
    ) -> crate::error::Result<Vec<RatingEntry>> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        let mut matching_entries: Vec<RatingEntry> = ratings
            .values()
            .filter(|entry| entry.category() == category)
            .cloned()
            .collect();

        matching_entries.sort_by(|a, b| b.rating.cmp(&a.rating));

        Ok(matching_entries)
    }

    fn get_player_count(&self) -> crate::error::Result<usize> {
        let ratings =
            self.ratings
                .read()
                .map_err(|_| crate::error::RatingError::InternalError {
                    message: "Failed to acquire ratings read lock".to_string(),
                })?;

        Ok(ratings.len())
    }
}
