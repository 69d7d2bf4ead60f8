use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{score, shared::AppState, user};

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Builds the read-only API router over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/users/:user", get(user::get_user))
        .route("/users/:user/:mode", get(user::get_user_mode))
        .route("/users/:user/scores/:method", get(score::list_user_scores))
        .route("/scores/:mode/:score_id", get(score::get_score))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
