use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{service::UserService, types::UserResponse};
use crate::{
    mode::GameMode,
    shared::{AppError, AppState},
};

/// HTTP handler for a user profile in the user's favorite mode
///
/// GET /users/:user
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    lookup_user(&state, &user, GameMode::Unknown).await
}

/// HTTP handler for a user profile in a given mode
///
/// GET /users/:user/:mode
/// Unrecognised mode tokens fall back to the favorite mode
#[instrument(name = "get_user_mode", skip(state))]
pub async fn get_user_mode(
    State(state): State<AppState>,
    Path((user, mode)): Path<(String, String)>,
) -> Result<Json<UserResponse>, AppError> {
    lookup_user(&state, &user, GameMode::resolve(&mode)).await
}

async fn lookup_user(
    state: &AppState,
    token: &str,
    mode: GameMode,
) -> Result<Json<UserResponse>, AppError> {
    info!(user = %token, %mode, "Looking up user");

    let service = UserService::new(Arc::clone(&state.user_repository), &state.config);
    service
        .get_user(token, mode)
        .await?
        .map(Json)
        .ok_or_else(AppError::not_found)
}
