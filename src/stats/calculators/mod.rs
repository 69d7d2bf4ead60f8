pub mod level;
pub mod weight;

pub use level::{level_for_score, progress_percent, required_score, LevelProgress};
pub use weight::{ScoreWeight, ScoreWeighting};
