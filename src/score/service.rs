use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{BeatmapRow, ScoreRow},
    repository::ScoreRepository,
    types::{BeatmapInfo, BeatmapsetInfo, HitStatistics, ScoreListMethod, ScoreResponse},
};
use crate::{
    config::{AppConfig, AssetConfig},
    mode::GameMode,
    mods::Mods,
    shared::AppError,
    stats::{ScoreWeight, ScoreWeighting},
    user::{repository::UserRepository, UserResponse, UserService},
};

/// Service assembling score responses and user score listings
pub struct ScoreService {
    repository: Arc<dyn ScoreRepository + Send + Sync>,
    users: UserService,
    assets: AssetConfig,
    weighting: ScoreWeighting,
}

impl ScoreService {
    pub fn new(
        repository: Arc<dyn ScoreRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        config: &AppConfig,
    ) -> Self {
        Self {
            repository,
            users: UserService::new(user_repository, config),
            assets: config.assets.clone(),
            weighting: ScoreWeighting::new(),
        }
    }

    /// A single score with its owner and beatmap.
    ///
    /// Returns `None` if the score, its owner or its beatmap is missing.
    #[instrument(skip(self))]
    pub async fn get_score(
        &self,
        score_id: i64,
        mode: GameMode,
    ) -> Result<Option<ScoreResponse>, AppError> {
        let Some(row) = self.repository.get_score(score_id, mode).await? else {
            debug!(score_id, "Score not found");
            return Ok(None);
        };

        let Some(user) = self.users.get_user_by_id(row.user_id, mode).await? else {
            debug!(score_id, user_id = row.user_id, "Score owner not found");
            return Ok(None);
        };

        let Some(beatmap) = self.repository.get_beatmap(&row.map_md5).await? else {
            debug!(score_id, md5 = %row.map_md5, "Beatmap not found");
            return Ok(None);
        };

        Ok(Some(self.assemble(row, &beatmap, mode, user)))
    }

    /// Best or recent scores of a user; `None` if the user does not exist.
    ///
    /// Best listings carry a weight per score, decaying with the position of
    /// the score counted from `offset`.
    #[instrument(skip(self))]
    pub async fn list_scores(
        &self,
        method: ScoreListMethod,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Option<Vec<ScoreResponse>>, AppError> {
        let Some(user) = self.users.get_user_by_id(user_id, mode).await? else {
            debug!(user_id, "User not found");
            return Ok(None);
        };

        let rows = match method {
            ScoreListMethod::Best => {
                self.repository
                    .best_scores(user_id, mode, limit, offset)
                    .await?
            }
            ScoreListMethod::Recent => {
                self.repository
                    .recent_scores(user_id, mode, limit, offset)
                    .await?
            }
        };

        let weights: Vec<Option<ScoreWeight>> = match method {
            ScoreListMethod::Best => self
                .weighting
                .weigh_page(offset, rows.iter().map(|row| row.pp))
                .into_iter()
                .map(Some)
                .collect(),
            ScoreListMethod::Recent => vec![None; rows.len()],
        };

        let mut scores = Vec::with_capacity(rows.len());
        for (row, weight) in rows.into_iter().zip(weights) {
            let Some(beatmap) = self.repository.get_beatmap(&row.map_md5).await? else {
                debug!(score_id = row.id, md5 = %row.map_md5, "Skipping score without beatmap");
                continue;
            };

            let mut score = self.assemble(row, &beatmap, mode, user.clone());
            score.weight = weight;
            scores.push(score);
        }

        info!(user_id, %method, count = scores.len(), "Scores listed");
        Ok(Some(scores))
    }

    pub async fn best_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Option<Vec<ScoreResponse>>, AppError> {
        self.list_scores(ScoreListMethod::Best, user_id, mode, limit, offset)
            .await
    }

    pub async fn recent_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Option<Vec<ScoreResponse>>, AppError> {
        self.list_scores(ScoreListMethod::Recent, user_id, mode, limit, offset)
            .await
    }

    fn assemble(
        &self,
        row: ScoreRow,
        beatmap: &BeatmapRow,
        mode: GameMode,
        user: UserResponse,
    ) -> ScoreResponse {
        ScoreResponse {
            replay: true,
            accuracy: row.accuracy_fraction(),
            best_id: row.id,
            created_at: row.created_at(),
            id: row.id,
            max_combo: row.max_combo,
            mode: mode.name().to_string(),
            mode_int: mode.vanilla_value(),
            mods: Mods::from_raw(row.mods).as_list(),
            passed: row.passed(),
            perfect: row.is_perfect(),
            pp: row.pp,
            rank: row.display_grade(),
            score: row.score,
            statistics: HitStatistics {
                count_300: row.n300,
                count_100: row.n100,
                count_50: row.n50,
                count_geki: row.ngeki,
                count_katu: row.nkatu,
                count_miss: row.nmiss,
            },
            beatmap: BeatmapInfo::from(beatmap),
            beatmapset: BeatmapsetInfo::new(beatmap, &self.assets),
            user_id: row.user_id,
            user,
            weight: None,
        }
    }
}
