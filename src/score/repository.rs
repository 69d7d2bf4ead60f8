use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{BeatmapRow, ScoreRow, BEATMAP_STATUS_RANKED, SUBMISSION_STATUS_BEST};
use crate::{mode::GameMode, shared::AppError};

/// Trait for read-only score and beatmap access
#[async_trait]
pub trait ScoreRepository {
    async fn get_score(&self, score_id: i64, mode: GameMode)
        -> Result<Option<ScoreRow>, AppError>;

    /// Best submissions on ranked maps, highest pp first
    async fn best_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError>;

    /// Every attempt regardless of status, most recent first
    async fn recent_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError>;

    async fn get_beatmap(&self, md5: &str) -> Result<Option<BeatmapRow>, AppError>;
}

#[derive(Default)]
struct InMemoryScoreData {
    scores: BTreeMap<i64, ScoreRow>,
    beatmaps: HashMap<String, BeatmapRow>,
}

impl InMemoryScoreData {
    fn user_scores(&self, user_id: i64, mode: GameMode) -> impl Iterator<Item = &ScoreRow> {
        let mode_value = i64::from(mode.value());
        self.scores
            .values()
            .filter(move |score| score.user_id == user_id && score.mode == mode_value)
    }

    fn on_ranked_map(&self, score: &ScoreRow) -> bool {
        self.beatmaps
            .get(&score.map_md5)
            .is_some_and(BeatmapRow::is_ranked)
    }
}

fn window(rows: Vec<ScoreRow>, limit: u32, offset: u32) -> Vec<ScoreRow> {
    rows.into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

/// In-memory implementation of ScoreRepository for development and testing
#[derive(Default)]
pub struct InMemoryScoreRepository {
    data: RwLock<InMemoryScoreData>,
}

impl InMemoryScoreRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory repository with pre-populated scores and beatmaps
    pub fn with_rows(scores: Vec<ScoreRow>, beatmaps: Vec<BeatmapRow>) -> Self {
        let data = InMemoryScoreData {
            scores: scores.into_iter().map(|score| (score.id, score)).collect(),
            beatmaps: beatmaps
                .into_iter()
                .map(|map| (map.md5.clone(), map))
                .collect(),
        };

        Self {
            data: RwLock::new(data),
        }
    }

    pub async fn insert_beatmap(&self, beatmap: BeatmapRow) {
        self.data
            .write()
            .await
            .beatmaps
            .insert(beatmap.md5.clone(), beatmap);
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    #[instrument(skip(self))]
    async fn get_score(
        &self,
        score_id: i64,
        mode: GameMode,
    ) -> Result<Option<ScoreRow>, AppError> {
        let data = self.data.read().await;
        let score = data
            .scores
            .get(&score_id)
            .filter(|score| score.mode == i64::from(mode.value()))
            .cloned();

        debug!(found = score.is_some(), "Score lookup in memory");
        Ok(score)
    }

    #[instrument(skip(self))]
    async fn best_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<ScoreRow> = data
            .user_scores(user_id, mode)
            .filter(|score| score.is_best() && data.on_ranked_map(score))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.pp.total_cmp(&a.pp).then(a.id.cmp(&b.id)));

        Ok(window(rows, limit, offset))
    }

    #[instrument(skip(self))]
    async fn recent_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<ScoreRow> = data.user_scores(user_id, mode).cloned().collect();
        rows.sort_by(|a, b| b.play_time.cmp(&a.play_time).then(b.id.cmp(&a.id)));

        Ok(window(rows, limit, offset))
    }

    #[instrument(skip(self))]
    async fn get_beatmap(&self, md5: &str) -> Result<Option<BeatmapRow>, AppError> {
        Ok(self.data.read().await.beatmaps.get(md5).cloned())
    }
}

const SCORE_COLUMNS: &str = "CAST(s.id AS SIGNED) AS id, s.map_md5, \
    CAST(s.score AS SIGNED) AS score, s.pp + 0e0 AS pp, s.acc + 0e0 AS acc, \
    CAST(s.max_combo AS SIGNED) AS max_combo, CAST(s.mods AS SIGNED) AS mods, \
    CAST(s.n300 AS SIGNED) AS n300, CAST(s.n100 AS SIGNED) AS n100, \
    CAST(s.n50 AS SIGNED) AS n50, CAST(s.nmiss AS SIGNED) AS nmiss, \
    CAST(s.ngeki AS SIGNED) AS ngeki, CAST(s.nkatu AS SIGNED) AS nkatu, \
    s.grade, CAST(s.status AS SIGNED) AS status, CAST(s.mode AS SIGNED) AS mode, \
    s.play_time, CAST(s.perfect AS SIGNED) AS perfect, \
    CAST(s.userid AS SIGNED) AS userid";

const SELECT_BEATMAP: &str = "SELECT CAST(id AS SIGNED) AS id, \
    CAST(set_id AS SIGNED) AS set_id, md5, CAST(status AS SIGNED) AS status, \
    artist, title, version, creator \
    FROM maps WHERE md5 = ?";

/// MySQL implementation of score repository
pub struct MySqlScoreRepository {
    pool: MySqlPool,
    split_tables: bool,
}

impl MySqlScoreRepository {
    pub fn new(pool: MySqlPool, split_tables: bool) -> Self {
        Self { pool, split_tables }
    }

    /// Table holding scores for `mode` under the configured layout
    pub fn scores_table(&self, mode: GameMode) -> &'static str {
        if self.split_tables {
            mode.storage_category().scores_table()
        } else {
            "scores"
        }
    }
}

#[async_trait]
impl ScoreRepository for MySqlScoreRepository {
    #[instrument(skip(self))]
    async fn get_score(
        &self,
        score_id: i64,
        mode: GameMode,
    ) -> Result<Option<ScoreRow>, AppError> {
        let sql = format!(
            "SELECT {SCORE_COLUMNS} FROM {} s WHERE s.id = ? AND s.mode = ?",
            self.scores_table(mode)
        );

        sqlx::query_as::<_, ScoreRow>(&sql)
            .bind(score_id)
            .bind(mode.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, score_id, %mode, "Failed to fetch score from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn best_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError> {
        let sql = format!(
            "SELECT {SCORE_COLUMNS} FROM {} s \
             INNER JOIN maps m ON s.map_md5 = m.md5 \
             WHERE s.userid = ? AND s.mode = ? AND s.status = ? AND m.status = ? \
             ORDER BY s.pp DESC, s.id ASC LIMIT ? OFFSET ?",
            self.scores_table(mode)
        );

        sqlx::query_as::<_, ScoreRow>(&sql)
            .bind(user_id)
            .bind(mode.value())
            .bind(SUBMISSION_STATUS_BEST)
            .bind(BEATMAP_STATUS_RANKED)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, %mode, "Failed to fetch best scores from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn recent_scores(
        &self,
        user_id: i64,
        mode: GameMode,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ScoreRow>, AppError> {
        let sql = format!(
            "SELECT {SCORE_COLUMNS} FROM {} s \
             WHERE s.userid = ? AND s.mode = ? \
             ORDER BY s.play_time DESC, s.id DESC LIMIT ? OFFSET ?",
            self.scores_table(mode)
        );

        sqlx::query_as::<_, ScoreRow>(&sql)
            .bind(user_id)
            .bind(mode.value())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, %mode, "Failed to fetch recent scores from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn get_beatmap(&self, md5: &str) -> Result<Option<BeatmapRow>, AppError> {
        sqlx::query_as::<_, BeatmapRow>(SELECT_BEATMAP)
            .bind(md5)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, md5, "Failed to fetch beatmap from database");
                AppError::DatabaseError(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};

    fn beatmap(md5: &str, status: i64) -> BeatmapRow {
        BeatmapRow {
            id: 100,
            set_id: 10,
            md5: md5.to_string(),
            status,
            artist: "artist".to_string(),
            title: "title".to_string(),
            version: "Insane".to_string(),
            creator: "mapper".to_string(),
        }
    }

    fn score(id: i64, map: &str, pp: f64, minutes: i64) -> ScoreRow {
        let mut row = ScoreRow::new(id, 1, GameMode::Osu, map);
        row.pp = pp;
        row.play_time = (DateTime::UNIX_EPOCH + Duration::minutes(minutes)).naive_utc();
        row
    }

    fn repository() -> InMemoryScoreRepository {
        let mut failed = score(4, "ranked", 500.0, 40);
        failed.grade = "F".to_string();
        failed.status = 0;

        InMemoryScoreRepository::with_rows(
            vec![
                score(1, "ranked", 100.0, 10),
                score(2, "ranked", 200.0, 20),
                score(3, "loved", 300.0, 30),
                failed,
                ScoreRow::new(5, 1, GameMode::Taiko, "ranked"),
                ScoreRow::new(6, 2, GameMode::Osu, "ranked"),
            ],
            vec![beatmap("ranked", BEATMAP_STATUS_RANKED), beatmap("loved", 5)],
        )
    }

    #[tokio::test]
    async fn test_best_scores_only_ranked_best() {
        let repo = repository();
        let ids: Vec<i64> = repo
            .best_scores(1, GameMode::Osu, 10, 0)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_recent_scores_include_everything() {
        let repo = repository();
        let ids: Vec<i64> = repo
            .recent_scores(1, GameMode::Osu, 10, 0)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_listing_window() {
        let repo = repository();
        let page = repo.recent_scores(1, GameMode::Osu, 2, 1).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);

        let past_end = repo.recent_scores(1, GameMode::Osu, 5, 10).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_get_score_checks_mode() {
        let repo = repository();
        assert!(repo.get_score(5, GameMode::Taiko).await.unwrap().is_some());
        assert!(repo.get_score(5, GameMode::Osu).await.unwrap().is_none());
        assert!(repo.get_score(99, GameMode::Osu).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_beatmap() {
        let repo = InMemoryScoreRepository::new();
        repo.insert_beatmap(beatmap("abc", BEATMAP_STATUS_RANKED)).await;

        assert_eq!(repo.get_beatmap("abc").await.unwrap().unwrap().set_id, 10);
        assert!(repo.get_beatmap("def").await.unwrap().is_none());
    }
}
