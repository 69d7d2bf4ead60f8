use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

use crate::mode::GameMode;

/// Submission status of a player's best passing score on a beatmap
pub const SUBMISSION_STATUS_BEST: i64 = 2;
/// Beatmap status for ranked maps
pub const BEATMAP_STATUS_RANKED: i64 = 2;

const FAILED_GRADE: &str = "F";

/// Renders a stored grade for display; the legacy `X` grade becomes `SS`.
pub fn display_grade(grade: &str) -> String {
    grade.replace('X', "SS")
}

/// Database model for the scores table
#[derive(Debug, Clone, FromRow)]
pub struct ScoreRow {
    pub id: i64,
    pub map_md5: String,
    pub score: i64,
    pub pp: f64,
    /// Stored as a percentage (0-100)
    #[sqlx(rename = "acc")]
    pub accuracy: f64,
    pub max_combo: i64,
    pub mods: i64,
    pub n300: i64,
    pub n100: i64,
    pub n50: i64,
    pub nmiss: i64,
    pub ngeki: i64,
    pub nkatu: i64,
    pub grade: String,
    pub status: i64,
    pub mode: i64,
    pub play_time: NaiveDateTime,
    pub perfect: i64,
    #[sqlx(rename = "userid")]
    pub user_id: i64,
}

impl ScoreRow {
    /// Creates a best-status score with zeroed counters, played at the epoch
    pub fn new(id: i64, user_id: i64, mode: GameMode, map_md5: &str) -> Self {
        Self {
            id,
            map_md5: map_md5.to_string(),
            score: 0,
            pp: 0.0,
            accuracy: 0.0,
            max_combo: 0,
            mods: 0,
            n300: 0,
            n100: 0,
            n50: 0,
            nmiss: 0,
            ngeki: 0,
            nkatu: 0,
            grade: "A".to_string(),
            status: SUBMISSION_STATUS_BEST,
            mode: i64::from(mode.value()),
            play_time: DateTime::UNIX_EPOCH.naive_utc(),
            perfect: 0,
            user_id,
        }
    }

    pub fn passed(&self) -> bool {
        self.grade != FAILED_GRADE
    }

    pub fn is_perfect(&self) -> bool {
        self.perfect != 0
    }

    pub fn is_best(&self) -> bool {
        self.status == SUBMISSION_STATUS_BEST
    }

    pub fn display_grade(&self) -> String {
        display_grade(&self.grade)
    }

    /// Accuracy as a fraction in `[0, 1]`
    pub fn accuracy_fraction(&self) -> f64 {
        self.accuracy / 100.0
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.play_time.and_utc()
    }

    pub fn game_mode(&self) -> Option<GameMode> {
        i8::try_from(self.mode).ok().and_then(GameMode::from_value)
    }
}

/// Database model for the maps table
#[derive(Debug, Clone, FromRow)]
pub struct BeatmapRow {
    pub id: i64,
    pub set_id: i64,
    pub md5: String,
    pub status: i64,
    pub artist: String,
    pub title: String,
    pub version: String,
    pub creator: String,
}

impl BeatmapRow {
    pub fn is_ranked(&self) -> bool {
        self.status == BEATMAP_STATUS_RANKED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("X", "SS")]
    #[case("XH", "SSH")]
    #[case("S", "S")]
    #[case("SH", "SH")]
    #[case("A", "A")]
    #[case("F", "F")]
    fn test_display_grade(#[case] stored: &str, #[case] expected: &str) {
        assert_eq!(display_grade(stored), expected);
    }

    #[test]
    fn test_failed_score() {
        let mut score = ScoreRow::new(1, 1, GameMode::Osu, "abc");
        assert!(score.passed());

        score.grade = "F".to_string();
        assert!(!score.passed());
    }

    #[test]
    fn test_accuracy_fraction() {
        let mut score = ScoreRow::new(1, 1, GameMode::Osu, "abc");
        score.accuracy = 98.5;
        assert!((score.accuracy_fraction() - 0.985).abs() < 1e-12);
    }

    #[test]
    fn test_best_status() {
        let mut score = ScoreRow::new(1, 1, GameMode::Osu, "abc");
        assert!(score.is_best());

        score.status = 1;
        assert!(!score.is_best());
    }

    #[rstest]
    #[case(BEATMAP_STATUS_RANKED, true)]
    #[case(0, false)]
    #[case(5, false)]
    fn test_ranked_beatmap(#[case] status: i64, #[case] expected: bool) {
        let beatmap = BeatmapRow {
            id: 1,
            set_id: 1,
            md5: "abc".to_string(),
            status,
            artist: String::new(),
            title: String::new(),
            version: String::new(),
            creator: String::new(),
        };
        assert_eq!(beatmap.is_ranked(), expected);
    }

    #[test]
    fn test_game_mode() {
        let score = ScoreRow::new(1, 1, GameMode::OsuAutopilot, "abc");
        assert_eq!(score.game_mode(), Some(GameMode::OsuAutopilot));
    }
}
