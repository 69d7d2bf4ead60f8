use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use score_api::{
    build_router,
    config::AppConfig,
    score::{
        models::{BeatmapRow, ScoreRow},
        repository::InMemoryScoreRepository,
    },
    shared::AppState,
    user::{
        models::{StatsRow, UserRow},
        repository::InMemoryUserRepository,
    },
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    router: Router,
}

pub struct Response {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl TestApp {
    /// Sends a GET request through the full router
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Response {
            status,
            body: serde_json::from_slice(&bytes).unwrap(),
        }
    }
}

#[derive(Default)]
pub struct TestAppBuilder {
    users: Vec<UserRow>,
    stats: Vec<StatsRow>,
    scores: Vec<ScoreRow>,
    beatmaps: Vec<BeatmapRow>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: Vec<UserRow>) -> Self {
        self.users.extend(users);
        self
    }

    pub fn with_stats(mut self, stats: Vec<StatsRow>) -> Self {
        self.stats.extend(stats);
        self
    }

    pub fn with_scores(mut self, scores: Vec<ScoreRow>) -> Self {
        self.scores.extend(scores);
        self
    }

    pub fn with_beatmaps(mut self, beatmaps: Vec<BeatmapRow>) -> Self {
        self.beatmaps.extend(beatmaps);
        self
    }

    pub fn build(self) -> TestApp {
        let state = AppState::new(
            Arc::new(InMemoryUserRepository::with_rows(self.users, self.stats)),
            Arc::new(InMemoryScoreRepository::with_rows(self.scores, self.beatmaps)),
            AppConfig::default(),
        );

        TestApp {
            router: build_router(state),
        }
    }
}
