// Public API - what other modules can use
pub use handlers::{get_score, list_user_scores};
pub use service::ScoreService;
pub use types::{ScoreListMethod, ScoreListQuery, ScoreResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
