use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{mode::GameMode, shared::AppError, user::repository::UserRepository};

/// Leaderboard position of a user within a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRank {
    pub global: u64,
    pub country: u64,
}

impl UserRank {
    /// Converts counts of strictly-better competitors into 1-based positions.
    pub fn from_counts(higher_global: u64, higher_country: u64) -> Self {
        Self {
            global: higher_global + 1,
            country: higher_country + 1,
        }
    }
}

/// Computes leaderboard positions from the current statistics, without caching.
pub struct RankCalculator {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl RankCalculator {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Global and country rank for `pp` in `mode`.
    ///
    /// Only eligible users other than `user_id` with strictly greater pp are
    /// counted as competitors.
    #[instrument(skip(self))]
    pub async fn rank(
        &self,
        user_id: i64,
        country: &str,
        pp: f64,
        mode: GameMode,
    ) -> Result<UserRank, AppError> {
        let (higher_global, higher_country) = tokio::try_join!(
            self.repository.count_higher_pp(mode, pp, user_id, None),
            self.repository
                .count_higher_pp(mode, pp, user_id, Some(country)),
        )?;

        let rank = UserRank::from_counts(higher_global, higher_country);
        debug!(global = rank.global, country = rank.country, "Rank computed");
        Ok(rank)
    }
}
