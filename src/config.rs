use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_AVATAR_BASE_URL: &str = "https://a.ppy.sh/";
const DEFAULT_BEATMAP_ASSETS_URL: &str = "https://assets.ppy.sh/beatmaps/";
const DEFAULT_COVER_URL: &str = "https://osu.ppy.sh/images/headers/profile-covers/c1.jpg";
const DEFAULT_PLAYSTYLE: &[&str] = &["mouse", "keyboard"];
const DEFAULT_PROFILE_ORDER: &[&str] = &[
    "me",
    "recent_activity",
    "top_ranks",
    "medals",
    "historical",
    "beatmaps",
    "kudosu",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Base URLs for user avatars and beatmap artwork
#[derive(Debug, Clone, PartialEq)]
pub struct AssetConfig {
    pub avatar_base_url: String,
    pub beatmap_assets_url: String,
}

impl AssetConfig {
    pub fn avatar_url(&self, user_id: i64) -> String {
        format!("{}{}", self.avatar_base_url, user_id)
    }

    pub fn cover_url(&self, beatmapset_id: i64, name: &str) -> String {
        format!(
            "{}{}/covers/{}.jpg",
            self.beatmap_assets_url, beatmapset_id, name
        )
    }
}

/// Profile fields that are not stored per user
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDefaults {
    pub profile_colour: Option<String>,
    pub cover_url: String,
    pub playstyle: Vec<String>,
    pub profile_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_address: String,
    /// `None` runs the server against empty in-memory repositories
    pub database: Option<DatabaseConfig>,
    /// Read scores from `scores_vn` / `scores_rx` / `scores_ap` instead of `scores`
    pub split_score_tables: bool,
    pub assets: AssetConfig,
    pub profile: ProfileDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database: None,
            split_score_tables: false,
            assets: AssetConfig {
                avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
                beatmap_assets_url: DEFAULT_BEATMAP_ASSETS_URL.to_string(),
            },
            profile: ProfileDefaults {
                profile_colour: None,
                cover_url: DEFAULT_COVER_URL.to_string(),
                playstyle: to_strings(DEFAULT_PLAYSTYLE),
                profile_order: to_strings(DEFAULT_PROFILE_ORDER),
            },
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup, falling back to
    /// defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections,
            });

        let split_score_tables = match lookup("SCORES_SPLIT_TABLES") {
            Some(value) => parse_bool("SCORES_SPLIT_TABLES", value)?,
            None => defaults.split_score_tables,
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            database,
            split_score_tables,
            assets: AssetConfig {
                avatar_base_url: lookup("AVATAR_BASE_URL")
                    .unwrap_or(defaults.assets.avatar_base_url),
                beatmap_assets_url: lookup("BEATMAP_ASSETS_URL")
                    .unwrap_or(defaults.assets.beatmap_assets_url),
            },
            profile: ProfileDefaults {
                profile_colour: lookup("USER_DEFAULT_PROFILE_COLOUR")
                    .or(defaults.profile.profile_colour),
                cover_url: lookup("USER_DEFAULT_COVER_URL")
                    .unwrap_or(defaults.profile.cover_url),
                playstyle: lookup("USER_DEFAULT_PLAYSTYLE")
                    .map(|value| split_list(&value))
                    .unwrap_or(defaults.profile.playstyle),
                profile_order: lookup("USER_DEFAULT_PROFILE_ORDER")
                    .map(|value| split_list(&value))
                    .unwrap_or(defaults.profile.profile_order),
            },
        })
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
