// Public API - what other modules can use
pub use handlers::{get_user, get_user_mode};
pub use service::UserService;
pub use types::{UserResponse, UserStatisticsResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
