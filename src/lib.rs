// Library crate for the score API server
// This file exposes the public API for integration tests

pub mod config;
pub mod mode;
pub mod mods;
pub mod router;
pub mod score;
pub mod shared;
pub mod stats;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use mode::GameMode;
pub use mods::Mods;
pub use router::build_router;
pub use score::{ScoreResponse, ScoreService};
pub use shared::{AppError, AppState};
pub use user::{UserResponse, UserService};
