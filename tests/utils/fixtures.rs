//! Row builders for seeding the in-memory repositories
#![allow(dead_code)] // Test utilities may not all be used in every test

use chrono::{DateTime, Duration};

use score_api::{
    mode::GameMode,
    score::models::{BeatmapRow, ScoreRow, BEATMAP_STATUS_RANKED},
    user::models::{StatsRow, UserRow},
};

pub fn user(id: i64, name: &str, country: &str) -> UserRow {
    UserRow::new(id, name, country)
}

pub fn stats(user_id: i64, mode: GameMode, plays: i64, pp: f64) -> StatsRow {
    let mut row = StatsRow::empty(user_id, mode);
    row.plays = plays;
    row.pp = pp;
    row
}

/// Ranked beatmap whose md5 is `md5`
pub fn beatmap(md5: &str, id: i64, set_id: i64) -> BeatmapRow {
    BeatmapRow {
        id,
        set_id,
        md5: md5.to_string(),
        status: BEATMAP_STATUS_RANKED,
        artist: "xi".to_string(),
        title: "FREEDOM DiVE".to_string(),
        version: "FOUR DIMENSIONS".to_string(),
        creator: "Nakagawa-Kanon".to_string(),
    }
}

/// Passed best score played `minutes` after the epoch
pub fn score(id: i64, user_id: i64, map_md5: &str, pp: f64, minutes: i64) -> ScoreRow {
    let mut row = ScoreRow::new(id, user_id, GameMode::Osu, map_md5);
    row.pp = pp;
    row.score = (pp * 1000.0) as i64;
    row.accuracy = 98.0;
    row.play_time = (DateTime::UNIX_EPOCH + Duration::minutes(minutes)).naive_utc();
    row
}
