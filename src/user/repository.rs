use async_trait::async_trait;
use sqlx::MySqlPool;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{StatsRow, UserRow, PRIVILEGE_UNRESTRICTED};
use crate::{mode::GameMode, shared::AppError};

/// How a caller-supplied user token is matched against the users table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// All-digit token: matches the id, or a user literally named with digits.
    /// An id match wins over a name match.
    IdOrName(i64, String),
    Name(String),
}

impl UserLookup {
    pub fn parse(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = token.parse() {
                return UserLookup::IdOrName(id, token.to_string());
            }
        }
        UserLookup::Name(token.to_string())
    }
}

/// Trait for read-only user and statistics access
#[async_trait]
pub trait UserRepository {
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRow>, AppError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError>;
    async fn get_stats(&self, user_id: i64, mode: GameMode)
        -> Result<Option<StatsRow>, AppError>;

    /// All statistics rows of a user, one per mode played
    async fn list_stats(&self, user_id: i64) -> Result<Vec<StatsRow>, AppError>;

    /// Number of eligible users other than `exclude_user_id` with strictly
    /// greater pp in `mode`, optionally restricted to one country
    async fn count_higher_pp(
        &self,
        mode: GameMode,
        pp: f64,
        exclude_user_id: i64,
        country: Option<&str>,
    ) -> Result<u64, AppError>;
}

#[derive(Default)]
struct InMemoryUserData {
    users: BTreeMap<i64, UserRow>,
    stats: HashMap<(i64, i64), StatsRow>,
}

/// In-memory implementation of UserRepository for development and testing
#[derive(Default)]
pub struct InMemoryUserRepository {
    data: RwLock<InMemoryUserData>,
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory repository with pre-populated users and statistics
    pub fn with_rows(users: Vec<UserRow>, stats: Vec<StatsRow>) -> Self {
        let data = InMemoryUserData {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
            stats: stats
                .into_iter()
                .map(|row| ((row.id, row.mode), row))
                .collect(),
        };

        Self {
            data: RwLock::new(data),
        }
    }

    pub async fn insert_user(&self, user: UserRow) {
        self.data.write().await.users.insert(user.id, user);
    }

    pub async fn insert_stats(&self, stats: StatsRow) {
        self.data
            .write()
            .await
            .stats
            .insert((stats.id, stats.mode), stats);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRow>, AppError> {
        let data = self.data.read().await;

        let by_name = |name: &str| data.users.values().find(|u| u.matches_name(name)).cloned();
        let user = match lookup {
            UserLookup::IdOrName(id, name) => {
                data.users.get(id).cloned().or_else(|| by_name(name))
            }
            UserLookup::Name(name) => by_name(name),
        };

        debug!(found = user.is_some(), "User lookup in memory");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError> {
        Ok(self.data.read().await.users.get(&user_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_stats(
        &self,
        user_id: i64,
        mode: GameMode,
    ) -> Result<Option<StatsRow>, AppError> {
        let key = (user_id, i64::from(mode.value()));
        Ok(self.data.read().await.stats.get(&key).cloned())
    }

    #[instrument(skip(self))]
    async fn list_stats(&self, user_id: i64) -> Result<Vec<StatsRow>, AppError> {
        let data = self.data.read().await;
        let mut rows: Vec<StatsRow> = data
            .stats
            .values()
            .filter(|row| row.id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.mode);
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn count_higher_pp(
        &self,
        mode: GameMode,
        pp: f64,
        exclude_user_id: i64,
        country: Option<&str>,
    ) -> Result<u64, AppError> {
        let data = self.data.read().await;
        let mode_value = i64::from(mode.value());

        let count = data
            .stats
            .values()
            .filter(|row| row.mode == mode_value && row.pp > pp && row.id != exclude_user_id)
            .filter_map(|row| data.users.get(&row.id))
            .filter(|user| user.is_eligible())
            .filter(|user| country.map_or(true, |c| user.country.eq_ignore_ascii_case(c)))
            .count();

        Ok(count as u64)
    }
}

const SELECT_USER: &str = "SELECT CAST(id AS SIGNED) AS id, name, country, \
    CAST(priv AS SIGNED) AS priv, \
    CAST(creation_time AS SIGNED) AS creation_time, \
    CAST(latest_activity AS SIGNED) AS latest_activity \
    FROM users";

const SELECT_STATS: &str = "SELECT CAST(id AS SIGNED) AS id, CAST(mode AS SIGNED) AS mode, \
    CAST(tscore AS SIGNED) AS tscore, CAST(rscore AS SIGNED) AS rscore, \
    pp + 0e0 AS pp, acc + 0e0 AS acc, \
    CAST(plays AS SIGNED) AS plays, CAST(playtime AS SIGNED) AS playtime, \
    CAST(max_combo AS SIGNED) AS max_combo, CAST(total_hits AS SIGNED) AS total_hits, \
    CAST(replay_views AS SIGNED) AS replay_views, \
    CAST(xh_count AS SIGNED) AS xh_count, CAST(x_count AS SIGNED) AS x_count, \
    CAST(sh_count AS SIGNED) AS sh_count, CAST(s_count AS SIGNED) AS s_count, \
    CAST(a_count AS SIGNED) AS a_count \
    FROM stats";

/// MySQL implementation of user repository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    #[instrument(skip(self))]
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRow>, AppError> {
        let result = match lookup {
            UserLookup::IdOrName(id, name) => {
                let sql = format!("{SELECT_USER} WHERE id = ? OR name = ? ORDER BY id = ? DESC LIMIT 1");
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(*id)
                    .bind(name.as_str())
                    .bind(*id)
                    .fetch_optional(&self.pool)
                    .await
            }
            UserLookup::Name(name) => {
                let sql = format!("{SELECT_USER} WHERE name = ? LIMIT 1");
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(name.as_str())
                    .fetch_optional(&self.pool)
                    .await
            }
        };

        let user = result.map_err(|e| {
            warn!(error = %e, "Failed to look up user in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(found = user.is_some(), "User lookup in database");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError> {
        let sql = format!("{SELECT_USER} WHERE id = ?");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, "Failed to fetch user from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn get_stats(
        &self,
        user_id: i64,
        mode: GameMode,
    ) -> Result<Option<StatsRow>, AppError> {
        let sql = format!("{SELECT_STATS} WHERE id = ? AND mode = ?");
        sqlx::query_as::<_, StatsRow>(&sql)
            .bind(user_id)
            .bind(mode.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, %mode, "Failed to fetch stats from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn list_stats(&self, user_id: i64) -> Result<Vec<StatsRow>, AppError> {
        let sql = format!("{SELECT_STATS} WHERE id = ? ORDER BY mode");
        sqlx::query_as::<_, StatsRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, "Failed to list stats from database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn count_higher_pp(
        &self,
        mode: GameMode,
        pp: f64,
        exclude_user_id: i64,
        country: Option<&str>,
    ) -> Result<u64, AppError> {
        let mut sql = String::from(
            "SELECT COUNT(*) FROM stats s \
             INNER JOIN users u USING(id) \
             WHERE s.mode = ? AND s.pp > ? AND u.priv & ? AND u.id != ?",
        );
        if country.is_some() {
            sql.push_str(" AND u.country = ?");
        }

        let mut query = sqlx::query_scalar::<_, i64>(&sql)
            .bind(mode.value())
            .bind(pp)
            .bind(PRIVILEGE_UNRESTRICTED)
            .bind(exclude_user_id);
        if let Some(country) = country {
            query = query.bind(country);
        }

        let count = query.fetch_one(&self.pool).await.map_err(|e| {
            warn!(error = %e, %mode, "Failed to count higher-pp players");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
