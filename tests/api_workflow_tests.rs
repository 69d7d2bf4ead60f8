use axum::http::StatusCode;
use serde_json::json;

use score_api::mode::GameMode;

mod utils;

use utils::*;

const EPSILON: f64 = 1e-9;

/// Three ranked maps with one passed best score each, plus a failed attempt
/// that only shows up in recent listings.
fn leaderboard_app() -> TestApp {
    let mut failed = score(4, 1, "map-a", 0.0, 50);
    failed.grade = "F".to_string();
    failed.status = 0;

    let mut full_combo = score(1, 1, "map-a", 200.0, 10);
    full_combo.grade = "X".to_string();
    full_combo.accuracy = 100.0;
    full_combo.perfect = 1;

    TestAppBuilder::new()
        .with_users(vec![
            user(1, "alice", "us"),
            user(2, "bob", "us"),
            user(3, "carol", "jp"),
        ])
        .with_stats(vec![
            stats(1, GameMode::Osu, 120, 300.0),
            stats(2, GameMode::Osu, 80, 500.0),
            stats(3, GameMode::Osu, 60, 400.0),
        ])
        .with_beatmaps(vec![
            beatmap("map-a", 101, 11),
            beatmap("map-b", 102, 12),
            beatmap("map-c", 103, 13),
        ])
        .with_scores(vec![
            full_combo,
            score(2, 1, "map-b", 150.0, 30),
            score(3, 1, "map-c", 100.0, 20),
            failed,
        ])
        .build()
}

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|score| score["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_is_alive() {
    let app = TestAppBuilder::new().build();

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Hello World" }));
}

#[tokio::test]
async fn test_user_profile_ranks_against_peers() {
    let app = leaderboard_app();

    let response = app.get("/users/alice").await;

    assert_eq!(response.status, StatusCode::OK);
    let statistics = &response.body["statistics"];
    assert_eq!(statistics["global_rank"], 3);
    assert_eq!(statistics["rank"]["global"], 3);
    assert_eq!(statistics["rank"]["country"], 2);
    assert_eq!(response.body["country_code"], "US");
}

#[tokio::test]
async fn test_restricted_users_do_not_count_towards_rank() {
    let mut restricted = user(9, "cheater", "us");
    restricted.privileges = 0;

    let app = TestAppBuilder::new()
        .with_users(vec![user(1, "alice", "us"), restricted])
        .with_stats(vec![
            stats(1, GameMode::Osu, 10, 100.0),
            stats(9, GameMode::Osu, 10, 9000.0),
        ])
        .build();

    let response = app.get("/users/1/osu").await;

    assert_eq!(response.body["statistics"]["global_rank"], 1);
    assert_eq!(response.body["statistics"]["rank"]["country"], 1);
}

#[tokio::test]
async fn test_user_level_from_total_score() {
    let mut osu = stats(1, GameMode::Osu, 5, 0.0);
    osu.total_score = 7_000_000;

    let app = TestAppBuilder::new()
        .with_users(vec![user(1, "alice", "us")])
        .with_stats(vec![osu])
        .build();

    let response = app.get("/users/alice").await;

    assert_eq!(response.body["statistics"]["level"]["current"], 10);
    assert_eq!(response.body["statistics"]["level"]["progress"], 84);
}

#[tokio::test]
async fn test_user_mode_aliases_and_invalid_tokens() {
    let app = TestAppBuilder::new()
        .with_users(vec![user(1, "alice", "us")])
        .with_stats(vec![
            stats(1, GameMode::Osu, 100, 250.0),
            stats(1, GameMode::OsuRelax, 10, 900.0),
        ])
        .build();

    let relax = app.get("/users/alice/osuRX").await;
    assert_eq!(relax.body["statistics"]["pp"], 900.0);
    assert_eq!(relax.body["playmode"], "osu");

    let invalid = app.get("/users/alice/not-a-mode").await;
    let default = app.get("/users/alice").await;
    assert_eq!(invalid.status, StatusCode::OK);
    assert_eq!(invalid.body["statistics"], default.body["statistics"]);
    assert_eq!(default.body["statistics"]["pp"], 250.0);
}

#[tokio::test]
async fn test_best_scores_are_weighted() {
    let app = leaderboard_app();

    let response = app.get("/users/1/scores/best?limit=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1, 2]);

    let scores = response.body.as_array().unwrap();
    assert_eq!(scores[0]["weight"]["percentage"], 1.0);
    assert_eq!(scores[0]["weight"]["pp"], 200.0);

    let second = scores[1]["weight"]["pp"].as_f64().unwrap();
    assert!((second - 0.95 * 150.0).abs() < EPSILON);
}

#[tokio::test]
async fn test_best_scores_second_page() {
    let app = leaderboard_app();

    let response = app.get("/users/1/scores/best?limit=2&offset=2").await;

    assert_eq!(ids(&response.body), vec![3]);
    let percentage = response.body[0]["weight"]["percentage"].as_f64().unwrap();
    assert!((percentage - 0.95_f64.powi(2)).abs() < EPSILON);
}

#[tokio::test]
async fn test_recent_scores_include_failures_newest_first() {
    let app = leaderboard_app();

    let response = app.get("/users/1/scores/recent").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![4, 2, 3, 1]);
    assert_eq!(response.body[0]["passed"], false);
    assert!(response.body[0].get("weight").is_none());
}

#[tokio::test]
async fn test_listing_in_unplayed_mode_is_empty() {
    let app = leaderboard_app();

    let response = app.get("/users/1/scores/best?mode=mania").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_score_by_id() {
    let app = leaderboard_app();

    let response = app.get("/scores/osu/1").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["rank"], "SS");
    assert_eq!(body["accuracy"], 1.0);
    assert_eq!(body["perfect"], true);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["beatmap"]["id"], "101");
    assert_eq!(body["beatmapset"]["artist"], "xi");
    assert_eq!(
        body["beatmapset"]["covers"]["card@2x"],
        "https://assets.ppy.sh/beatmaps/11/covers/card@2x.jpg"
    );
}

#[tokio::test]
async fn test_not_found_responses() {
    let app = leaderboard_app();

    for uri in [
        "/users/nobody",
        "/users/404/osu",
        "/scores/osu/999",
        "/scores/taiko/1",
        "/users/404/scores/best",
        "/users/1/scores/firsts",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(response.body, json!({ "detail": "Not Found" }), "{}", uri);
    }
}
