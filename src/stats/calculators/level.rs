use serde::{Deserialize, Serialize};

/// Levels are never reported below this value, even for a zero total score.
pub const MIN_LEVEL: i32 = 1;
/// Upper bound for the level search; the curve itself is unbounded.
pub const MAX_LEVEL: i32 = 120;

const LEVEL_100_SCORE: f64 = 26_931_190_829.0;
const SCORE_PER_LEVEL_ABOVE_100: f64 = 1e11;

/// Cumulative total score required to reach `level`.
///
/// Levels up to 1 return `1.0` rather than zero so the value can always be
/// used as a divisor.
pub fn required_score(level: i32) -> f64 {
    if level <= 1 {
        return 1.0;
    }

    if level <= 100 {
        let l = f64::from(level);
        5000.0 / 3.0 * (4.0 * l.powi(3) - 3.0 * l.powi(2) - l) + 1.25 * 1.8_f64.powi(level - 60)
    } else {
        LEVEL_100_SCORE + SCORE_PER_LEVEL_ABOVE_100 * f64::from(level - 100)
    }
}

/// Largest level whose required score is strictly below `total_score`,
/// clamped to `[MIN_LEVEL, MAX_LEVEL]`.
pub fn level_for_score(total_score: i64) -> i32 {
    let total = total_score as f64;

    let mut level = 1;
    while level <= MAX_LEVEL {
        if total <= required_score(level) {
            return (level - 1).max(MIN_LEVEL);
        }
        level += 1;
    }

    MAX_LEVEL
}

/// Percentage of the score needed for the level after `level`, in `[0, 100]`.
pub fn progress_percent(level: i32, total_score: i64) -> i32 {
    let ratio = total_score as f64 / required_score(level + 1);
    (ratio * 100.0).floor().clamp(0.0, 100.0) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current: i32,
    pub progress: i32,
}

impl LevelProgress {
    pub fn from_total_score(total_score: i64) -> Self {
        let current = level_for_score(total_score);
        Self {
            current,
            progress: progress_percent(current, total_score),
        }
    }
}
