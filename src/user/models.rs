use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::mode::GameMode;

/// Privilege bit that marks an account as unrestricted and leaderboard-eligible.
pub const PRIVILEGE_UNRESTRICTED: i64 = 1;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub country: String,
    #[sqlx(rename = "priv")]
    pub privileges: i64,
    pub creation_time: i64,
    pub latest_activity: i64,
}

impl UserRow {
    /// Creates an unrestricted user with zeroed timestamps
    pub fn new(id: i64, name: &str, country: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            country: country.to_string(),
            privileges: PRIVILEGE_UNRESTRICTED,
            creation_time: 0,
            latest_activity: 0,
        }
    }

    /// Whether the user competes on leaderboards
    pub fn is_eligible(&self) -> bool {
        self.privileges & PRIVILEGE_UNRESTRICTED != 0
    }

    pub fn join_date(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.creation_time, 0).unwrap_or_default()
    }

    pub fn last_visit(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.latest_activity, 0).unwrap_or_default()
    }

    /// Case-insensitive comparison, mirroring the store's collation
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Database model for the per-(user, mode) stats table
#[derive(Debug, Clone, FromRow)]
pub struct StatsRow {
    pub id: i64,
    pub mode: i64,
    #[sqlx(rename = "tscore")]
    pub total_score: i64,
    #[sqlx(rename = "rscore")]
    pub ranked_score: i64,
    pub pp: f64,
    #[sqlx(rename = "acc")]
    pub accuracy: f64,
    pub plays: i64,
    #[sqlx(rename = "playtime")]
    pub play_time: i64,
    pub max_combo: i64,
    pub total_hits: i64,
    pub replay_views: i64,
    pub xh_count: i64,
    pub x_count: i64,
    pub sh_count: i64,
    pub s_count: i64,
    pub a_count: i64,
}

impl StatsRow {
    /// Zeroed statistics, used when a user has never played a mode
    pub fn empty(user_id: i64, mode: GameMode) -> Self {
        Self {
            id: user_id,
            mode: i64::from(mode.value()),
            total_score: 0,
            ranked_score: 0,
            pp: 0.0,
            accuracy: 0.0,
            plays: 0,
            play_time: 0,
            max_combo: 0,
            total_hits: 0,
            replay_views: 0,
            xh_count: 0,
            x_count: 0,
            sh_count: 0,
            s_count: 0,
            a_count: 0,
        }
    }

    /// Mode this row belongs to, or `None` for an out-of-range stored value
    pub fn game_mode(&self) -> Option<GameMode> {
        i8::try_from(self.mode).ok().and_then(GameMode::from_value)
    }
}
