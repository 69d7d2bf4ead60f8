use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::models::BeatmapRow;
use crate::{config::AssetConfig, stats::ScoreWeight, user::UserResponse};

/// Upper bound on a single listing page
pub const MAX_PAGE_SIZE: u32 = 100;

/// Which listing `/users/:user_id/scores/:method` serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ScoreListMethod {
    Best,
    Recent,
}

fn default_include_fails() -> String {
    "0".to_string()
}

fn default_mode() -> String {
    "osu".to_string()
}

fn default_limit() -> u32 {
    20
}

/// Query parameters for score listings
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreListQuery {
    #[serde(default = "default_include_fails")]
    pub include_fails: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl ScoreListQuery {
    pub fn include_fails(&self) -> bool {
        self.include_fails == "1"
    }

    pub fn page_size(&self) -> u32 {
        self.limit.min(MAX_PAGE_SIZE)
    }
}

impl Default for ScoreListQuery {
    fn default() -> Self {
        Self {
            include_fails: default_include_fails(),
            mode: default_mode(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitStatistics {
    pub count_300: i64,
    pub count_100: i64,
    pub count_50: i64,
    pub count_geki: i64,
    pub count_katu: i64,
    pub count_miss: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapInfo {
    pub beatmapset_id: String,
    pub id: String,
    pub version: String,
}

impl From<&BeatmapRow> for BeatmapInfo {
    fn from(row: &BeatmapRow) -> Self {
        Self {
            beatmapset_id: row.set_id.to_string(),
            id: row.id.to_string(),
            version: row.version.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapCovers {
    pub cover: String,
    #[serde(rename = "cover@2x")]
    pub cover_2x: String,
    pub card: String,
    #[serde(rename = "card@2x")]
    pub card_2x: String,
    pub list: String,
    #[serde(rename = "list@2x")]
    pub list_2x: String,
    pub slimcover: String,
    #[serde(rename = "slimcover@2x")]
    pub slimcover_2x: String,
}

impl BeatmapCovers {
    pub fn new(assets: &AssetConfig, beatmapset_id: i64) -> Self {
        let url = |name: &str| assets.cover_url(beatmapset_id, name);
        Self {
            cover: url("cover"),
            cover_2x: url("cover@2x"),
            card: url("card"),
            card_2x: url("card@2x"),
            list: url("list"),
            list_2x: url("list@2x"),
            slimcover: url("slimcover"),
            slimcover_2x: url("slimcover@2x"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatmapsetInfo {
    pub artist: String,
    pub artist_unicode: String,
    pub title: String,
    pub title_unicode: String,
    pub creator: String,
    pub covers: BeatmapCovers,
}

impl BeatmapsetInfo {
    pub fn new(row: &BeatmapRow, assets: &AssetConfig) -> Self {
        Self {
            artist: row.artist.clone(),
            artist_unicode: row.artist.clone(),
            title: row.title.clone(),
            title_unicode: row.title.clone(),
            creator: row.creator.clone(),
            covers: BeatmapCovers::new(assets, row.set_id),
        }
    }
}

/// A single play with its owning user and beatmap metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub replay: bool,
    pub accuracy: f64,
    pub best_id: i64,
    pub created_at: DateTime<Utc>,
    pub id: i64,
    pub max_combo: i64,
    pub mode: String,
    pub mode_int: i8,
    pub mods: Vec<String>,
    pub passed: bool,
    pub perfect: bool,
    pub pp: f64,
    pub rank: String,
    pub score: i64,
    pub statistics: HitStatistics,
    pub beatmap: BeatmapInfo,
    pub beatmapset: BeatmapsetInfo,
    pub user_id: i64,
    pub user: UserResponse,
    /// Only present in best-scores listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<ScoreWeight>,
}
