use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::StatsRow;
use crate::stats::{LevelProgress, UserRank};

/// Grade tallies for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub ss: i64,
    pub ssh: i64,
    pub s: i64,
    pub sh: i64,
    pub a: i64,
}

impl From<&StatsRow> for GradeCounts {
    fn from(row: &StatsRow) -> Self {
        Self {
            ss: row.x_count,
            ssh: row.xh_count,
            s: row.s_count,
            sh: row.sh_count,
            a: row.a_count,
        }
    }
}

/// Statistics of a user for a single mode, with derived level and rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatisticsResponse {
    pub level: LevelProgress,
    pub grade_counts: GradeCounts,
    pub rank: UserRank,
    pub pp: f64,
    pub global_rank: u64,
    pub ranked_score: i64,
    pub hit_accuracy: f64,
    pub play_count: i64,
    pub play_time: i64,
    pub total_score: i64,
    pub maximum_combo: i64,
    pub total_hits: i64,
    pub replays_watched_by_others: i64,
    pub is_ranked: bool,
}

impl UserStatisticsResponse {
    pub fn from_row(row: &StatsRow, rank: UserRank) -> Self {
        Self {
            level: LevelProgress::from_total_score(row.total_score),
            grade_counts: GradeCounts::from(row),
            rank,
            pp: row.pp,
            global_rank: rank.global,
            ranked_score: row.ranked_score,
            hit_accuracy: row.accuracy,
            play_count: row.plays,
            play_time: row.play_time,
            total_score: row.total_score,
            maximum_combo: row.max_combo,
            total_hits: row.total_hits,
            replays_watched_by_others: row.replay_views,
            is_ranked: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCover {
    pub custom_url: String,
    pub url: String,
}

/// Response structure for user profile endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub avatar_url: String,
    pub country_code: String,
    pub last_visit: DateTime<Utc>,
    pub join_date: DateTime<Utc>,
    pub statistics: UserStatisticsResponse,
    /// Vanilla name of the user's most played mode
    pub playmode: String,
    pub is_active: bool,
    pub is_bot: bool,
    pub is_deleted: bool,
    pub is_online: bool,
    pub is_supporter: bool,
    pub pm_friends_only: bool,
    pub profile_colour: Option<String>,
    pub cover_url: String,
    pub has_supported: bool,
    pub max_blocks: u32,
    pub max_friends: u32,
    pub playstyle: Vec<String>,
    pub post_count: u32,
    pub profile_order: Vec<String>,
    pub cover: ProfileCover,
}
