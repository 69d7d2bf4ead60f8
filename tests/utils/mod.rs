pub mod fixtures;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use fixtures::{beatmap, score, stats, user};
#[allow(unused_imports)]
pub use setup::{Response, TestApp, TestAppBuilder};
