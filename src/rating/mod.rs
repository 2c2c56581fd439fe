//! Rating subsystem: Elo calculation, category bands, validity checks,
//! and player record storage
//!
//! The calculation functions are pure; all player state lives behind
//! [`RatingStorage`].

pub mod calculator;
pub mod category;
pub mod elo;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use category::classify_rating;
pub use elo::{expected_score, rating_change, EloConfig, EloRatingCalculator};
pub use storage::{InMemoryRatingStorage, RatingEntry, RatingStorage};
pub use validation::{is_valid_rating, MAX_RATING, MIN_RATING};

use crate::error::{RatingError, Result};
use crate::types::{MatchOutcome, MatchRecord, PlayerId};
use crate::utils::{current_timestamp, generate_match_id};
use tracing::debug;

/// Record one match result against both players' stored ratings.
///
/// Looks up both players, computes each side's change (the opponent sees the
/// inverted outcome), applies and stores the updated entries, and returns a
/// record per side sharing one match id.
pub fn record_result(
    calculator: &dyn RatingCalculator,
    storage: &dyn RatingStorage,
    player_id: &PlayerId,
    opponent_id: &PlayerId,
    outcome: MatchOutcome,
) -> Result<(MatchRecord, MatchRecord)> {
    if player_id == opponent_id {
        return Err(RatingError::InvalidMatchResult {
            reason: "player and opponent must differ".to_string(),
        }
        .into());
    }

    let mut player_entry =
        storage
            .get_rating(player_id)?
            .ok_or_else(|| RatingError::PlayerNotFound {
                player_id: player_id.clone(),
            })?;
    let mut opponent_entry =
        storage
            .get_rating(opponent_id)?
            .ok_or_else(|| RatingError::PlayerNotFound {
                player_id: opponent_id.clone(),
            })?;

    let player_change =
        calculator.calculate_rating_change(player_entry.rating, opponent_entry.rating, outcome)?;
    let opponent_change = calculator.calculate_rating_change(
        opponent_entry.rating,
        player_entry.rating,
        outcome.inverted(),
    )?;

    player_entry.apply_change(&player_change);
    opponent_entry.apply_change(&opponent_change);
    storage.store_ratings(vec![player_entry, opponent_entry])?;

    let match_id = generate_match_id();
    let recorded_at = current_timestamp();
    debug!(
        %match_id,
        player = %player_id,
        opponent = %opponent_id,
        delta = player_change.delta,
        "recorded match result"
    );

    Ok((
        MatchRecord {
            match_id,
            player_id: player_id.clone(),
            opponent_id: opponent_id.clone(),
            change: player_change,
            recorded_at,
        },
        MatchRecord {
            match_id,
            player_id: opponent_id.clone(),
            opponent_id: player_id.clone(),
            change: opponent_change,
            recorded_at,
        },
    ))
}
