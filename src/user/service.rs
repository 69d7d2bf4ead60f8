use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{StatsRow, UserRow},
    repository::{UserLookup, UserRepository},
    types::{ProfileCover, UserResponse, UserStatisticsResponse},
};
use crate::{
    config::{AppConfig, AssetConfig, ProfileDefaults},
    mode::GameMode,
    shared::AppError,
    stats::RankCalculator,
};

/// Mode with the highest play count; ties go to the lower mode value.
/// Users without any plays default to osu.
pub fn favorite_mode_from_stats(stats: &[StatsRow]) -> GameMode {
    stats
        .iter()
        .filter(|row| row.plays > 0)
        .filter_map(|row| {
            row.game_mode()
                .filter(|mode| mode.is_known())
                .map(|mode| (mode, row.plays))
        })
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(mode, _)| mode)
        .unwrap_or(GameMode::Osu)
}

/// Service assembling user profiles from stored rows and derived metrics
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    ranks: RankCalculator,
    assets: AssetConfig,
    profile: ProfileDefaults,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>, config: &AppConfig) -> Self {
        Self {
            ranks: RankCalculator::new(Arc::clone(&repository)),
            repository,
            assets: config.assets.clone(),
            profile: config.profile.clone(),
        }
    }

    /// Looks up a user by id-or-name token.
    ///
    /// `GameMode::Unknown` selects the user's favorite mode for the statistics.
    #[instrument(skip(self))]
    pub async fn get_user(
        &self,
        token: &str,
        mode: GameMode,
    ) -> Result<Option<UserResponse>, AppError> {
        let Some(row) = self.repository.find_user(&UserLookup::parse(token)).await? else {
            debug!(token = %token, "User not found");
            return Ok(None);
        };

        let user = self.assemble(row, mode).await?;
        info!(user_id = user.id, playmode = %user.playmode, "User assembled");
        Ok(Some(user))
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(
        &self,
        user_id: i64,
        mode: GameMode,
    ) -> Result<Option<UserResponse>, AppError> {
        match self.repository.get_user(user_id).await? {
            Some(row) => Ok(Some(self.assemble(row, mode).await?)),
            None => {
                debug!(user_id, "User not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn favorite_mode(&self, user_id: i64) -> Result<GameMode, AppError> {
        let stats = self.repository.list_stats(user_id).await?;
        Ok(favorite_mode_from_stats(&stats))
    }

    /// Statistics for `mode`, zeroed if the user never played it
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn statistics(
        &self,
        user: &UserRow,
        mode: GameMode,
    ) -> Result<UserStatisticsResponse, AppError> {
        let stats = match self.repository.get_stats(user.id, mode).await? {
            Some(stats) => stats,
            None => {
                debug!(%mode, "No stats recorded for mode, using empty statistics");
                StatsRow::empty(user.id, mode)
            }
        };

        let rank = self.ranks.rank(user.id, &user.country, stats.pp, mode).await?;
        Ok(UserStatisticsResponse::from_row(&stats, rank))
    }

    async fn assemble(&self, row: UserRow, requested: GameMode) -> Result<UserResponse, AppError> {
        let favorite = self.favorite_mode(row.id).await?;
        let mode = if requested.is_known() {
            requested
        } else {
            favorite
        };

        let statistics = self.statistics(&row, mode).await?;

        Ok(UserResponse {
            id: row.id,
            avatar_url: self.assets.avatar_url(row.id),
            country_code: row.country.to_uppercase(),
            last_visit: row.last_visit(),
            join_date: row.join_date(),
            username: row.name,
            statistics,
            playmode: favorite.vanilla_name().to_string(),
            is_active: true,
            is_bot: false,
            is_deleted: false,
            is_online: false,
            is_supporter: false,
            pm_friends_only: false,
            profile_colour: self.profile.profile_colour.clone(),
            cover_url: self.profile.cover_url.clone(),
            has_supported: true,
            max_blocks: 50,
            max_friends: 500,
            playstyle: self.profile.playstyle.clone(),
            post_count: 0,
            profile_order: self.profile.profile_order.clone(),
            cover: ProfileCover {
                custom_url: self.profile.cover_url.clone(),
                url: self.profile.cover_url.clone(),
            },
        })
    }
}
