use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::{str::FromStr, sync::Arc};
use tracing::{debug, info, instrument};

use super::{
    service::ScoreService,
    types::{ScoreListMethod, ScoreListQuery, ScoreResponse},
};
use crate::{
    mode::GameMode,
    shared::{AppError, AppState},
};

fn score_service(state: &AppState) -> ScoreService {
    ScoreService::new(
        Arc::clone(&state.score_repository),
        Arc::clone(&state.user_repository),
        &state.config,
    )
}

/// HTTP handler for a single score
///
/// GET /scores/:mode/:score_id
/// Unrecognised mode tokens fall back to osu
#[instrument(name = "get_score", skip(state))]
pub async fn get_score(
    State(state): State<AppState>,
    Path((mode, score_id)): Path<(String, i64)>,
) -> Result<Json<ScoreResponse>, AppError> {
    let mode = GameMode::resolve_or(&mode, GameMode::Osu);
    info!(score_id, %mode, "Looking up score");

    score_service(&state)
        .get_score(score_id, mode)
        .await?
        .map(Json)
        .ok_or_else(AppError::not_found)
}

/// HTTP handler for a user's best or recent scores
///
/// GET /users/:user_id/scores/:method?mode=&limit=&offset=&include_fails=
#[instrument(name = "list_user_scores", skip(state))]
pub async fn list_user_scores(
    State(state): State<AppState>,
    Path((user_id, method)): Path<(i64, String)>,
    query: Result<Query<ScoreListQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoreResponse>>, AppError> {
    let Query(query) = query?;
    let Ok(method) = ScoreListMethod::from_str(&method) else {
        debug!(%method, "Unsupported score listing");
        return Err(AppError::not_found());
    };

    if query.include_fails() {
        // Accepted for compatibility; listings do not filter on it.
        debug!("include_fails requested");
    }

    let mode = GameMode::resolve_or(&query.mode, GameMode::Osu);
    info!(user_id, %method, %mode, limit = query.limit, offset = query.offset, "Listing scores");

    score_service(&state)
        .list_scores(method, user_id, mode, query.page_size(), query.offset)
        .await?
        .map(Json)
        .ok_or_else(AppError::not_found)
}
