pub mod calculators;
pub mod rank;

pub use calculators::{LevelProgress, ScoreWeight, ScoreWeighting};
pub use rank::{RankCalculator, UserRank};
