//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use courtside_observer::router::build_router;
use courtside_observer::state::AppState;
use courtside_types::{GamePhase, Quarter, Scoreboard};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_router() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::default());
    (build_router(Arc::clone(&state)), state)
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = body_bytes(response.into_body()).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = body_bytes(response.into_body()).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn started_game() -> (Router, Arc<AppState>) {
    let (router, state) = test_router();
    let (status, _) = post(
        &router,
        "/api/game",
        json!({
            "own_team": "Wildcats",
            "opponent_team": "Hornets",
            "players": ["A", "B", "C", "D", "E", "F"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post(
        &router,
        "/api/game/lineup",
        json!({ "players": ["A", "B", "C", "D", "E"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (router, state)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (router, _) = test_router();

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_index_renders_live_game() {
    let (router, _) = test_router();
    post(
        &router,
        "/api/game",
        json!({
            "own_team": "<Cats>",
            "players": ["A", "B", "C", "D", "E", "F"]
        }),
    )
    .await;
    post(
        &router,
        "/api/game/lineup",
        json!({ "players": ["A", "B", "C", "D", "E"] }),
    )
    .await;
    post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 2 }),
    )
    .await;

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("&lt;Cats&gt;"));
    assert!(!html.contains("<Cats>"));
    assert!(html.contains("<li>A: +2 (1 possessions)</li>"));
    assert!(html.contains("<li>F: 0 (0 possessions)</li>"));
    assert!(html.contains("<li>1. [Q1] &lt;Cats&gt; +2 | Lineup: A, B, C, D, E</li>"));
}

#[tokio::test]
async fn test_health() {
    let (router, _) = test_router();
    let (status, json) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_no_game_returns_404() {
    let (router, _) = test_router();

    let (status, json) = get(&router, "/api/game").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "no game in progress");

    let (status, _) = post(&router, "/api/game/undo", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_start_game_trims_roster() {
    let (router, _) = test_router();

    let (status, json) = post(
        &router,
        "/api/game",
        json!({ "players": [" A ", "", "B", "C", "D", "E"] }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["roster"], json!(["A", "B", "C", "D", "E"]));
    assert_eq!(json["scoreboard"]["own_team"], "Team");
    assert_eq!(json["scoreboard"]["opponent_team"], "Opponent");
    assert_eq!(json["scoreboard"]["phase"], "setup");
    assert!(json["game_id"].is_string());
}

#[tokio::test]
async fn test_start_game_rejects_short_roster() {
    let (router, _) = test_router();

    let (status, json) = post(&router, "/api/game", json!({ "players": ["A", "B", "C"] })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
    assert!(json["error"].as_str().unwrap().contains("at least 5"));
}

#[tokio::test]
async fn test_full_game_flow() {
    let (router, _) = started_game().await;

    // Own basket: A-E each +2.
    let (status, tally) = post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tally["team_score"], 2);
    assert_eq!(tally["plus_minus"]["A"], 2);
    assert_eq!(tally["possessions_played"]["E"], 1);
    assert_eq!(tally["possessions_played"]["F"], 0);

    // Undo restores zero and offers one redo.
    let (status, tally) = post(&router, "/api/game/undo", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tally["team_score"], 0);
    assert_eq!(tally["plus_minus"]["A"], 0);
    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["redo_available"], 1);

    // Redo brings it back.
    let (status, tally) = post(&router, "/api/game/redo", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tally["team_score"], 2);
    assert_eq!(tally["plus_minus"]["E"], 2);

    // E off, F on; opponent three.
    let (status, json) = post(
        &router,
        "/api/game/substitution",
        json!({ "out": ["E"], "in": ["F"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lineup"], json!(["A", "B", "C", "D", "F"]));

    let (_, tally) = post(
        &router,
        "/api/game/score",
        json!({ "team": "opponent", "points": 3 }),
    )
    .await;
    assert_eq!(tally["opponent_score"], 3);
    assert_eq!(tally["plus_minus"]["F"], -3);
    assert_eq!(tally["plus_minus"]["E"], 2);

    // Report rows follow roster order.
    let (status, report) = get(&router, "/api/game/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report[0]["player"], "A");
    assert_eq!(report[0]["plus_minus"], -1);
    assert_eq!(report[0]["possessions_played"], 2);
    assert_eq!(report[5]["player"], "F");
    assert_eq!(report[5]["possessions_played"], 1);

    // Play-by-play lists the two applied plays.
    let (status, plays) = get(&router, "/api/game/plays").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plays.as_array().unwrap().len(), 2);
    assert_eq!(plays[0]["index"], 1);
    assert_eq!(plays[0]["team"], "own");
    assert_eq!(plays[1]["lineup"], json!(["A", "B", "C", "D", "F"]));

    let (status, integrity) = get(&router, "/api/game/integrity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(integrity["status"], "consistent");
}

#[tokio::test]
async fn test_report_csv_download() {
    let (router, _) = started_game().await;
    post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 3 }),
    )
    .await;

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/game/report.csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(disposition.contains("plus_minus_report.csv"));

    let text = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Player,+/-,Possessions Played"));
    assert_eq!(lines.next(), Some("A,3,1"));
    assert!(text.contains("F,0,0"));
}

#[tokio::test]
async fn test_score_before_lineup_is_rejected() {
    let (router, _) = test_router();
    post(
        &router,
        "/api/game",
        json!({ "players": ["A", "B", "C", "D", "E"] }),
    )
    .await;

    let (status, json) = post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "the starting lineup has not been set");
}

#[tokio::test]
async fn test_invalid_lineup_is_rejected() {
    let (router, _) = test_router();
    post(
        &router,
        "/api/game",
        json!({ "players": ["A", "B", "C", "D", "E", "F"] }),
    )
    .await;

    let (status, _) = post(
        &router,
        "/api/game/lineup",
        json!({ "players": ["A", "B", "C", "D", "A"] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(
        &router,
        "/api/game/lineup",
        json!({ "players": ["A", "B", "C", "D", "Z"] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["phase"], "setup");
}

#[tokio::test]
async fn test_empty_undo_and_redo_are_rejected() {
    let (router, _) = started_game().await;

    let (status, json) = post(&router, "/api/game/undo", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("nothing to undo"));

    let (status, json) = post(&router, "/api/game/redo", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("nothing to redo"));
}

#[tokio::test]
async fn test_substitution_count_mismatch_is_rejected() {
    let (router, _) = started_game().await;

    let (status, _) = post(
        &router,
        "/api/game/substitution",
        json!({ "out": ["A", "B"], "in": ["F"] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["lineup"], json!(["A", "B", "C", "D", "E"]));
}

#[tokio::test]
async fn test_invalid_points_value_is_rejected() {
    let (router, _) = started_game().await;

    let (status, _) = post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 4 }),
    )
    .await;
    assert!(status.is_client_error());

    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["plays_logged"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::post("/api/game")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quarter_progression_to_final() {
    let (router, _) = started_game().await;

    for expected in ["Q2", "Q3", "Q4"] {
        let (status, json) = post(&router, "/api/game/quarter/complete", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current_quarter"], expected);
        assert_eq!(json["is_final"], false);
    }

    let (_, quarters) = get(&router, "/api/game/quarters").await;
    assert_eq!(quarters[2]["status"], "completed");
    assert_eq!(quarters[3]["status"], "in_progress");

    let (_, json) = post(&router, "/api/game/quarter/complete", json!({})).await;
    assert_eq!(json["current_quarter"], "Q4");
    assert_eq!(json["is_final"], true);

    // Completing again is a no-op.
    let (status, json) = post(&router, "/api/game/quarter/complete", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_final"], true);

    // Scoring is closed.
    let (status, json) = post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "the game is over");

    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["phase"], "final");
}

#[tokio::test]
async fn test_new_game_replaces_old() {
    let (router, _) = started_game().await;
    post(
        &router,
        "/api/game/score",
        json!({ "team": "own", "points": 2 }),
    )
    .await;

    let (status, _) = post(
        &router,
        "/api/game",
        json!({ "players": ["V", "W", "X", "Y", "Z"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, board) = get(&router, "/api/game").await;
    assert_eq!(board["team_score"], 0);
    assert_eq!(board["plays_logged"], 0);
    assert_eq!(board["phase"], "setup");
}

#[tokio::test]
async fn test_mutations_are_broadcast() {
    let (router, state) = test_router();
    let mut rx = state.subscribe();

    post(
        &router,
        "/api/game",
        json!({ "own_team": "Wildcats", "players": ["A", "B", "C", "D", "E"] }),
    )
    .await;
    let started: Scoreboard = rx.recv().await.unwrap();
    assert_eq!(started.own_team, "Wildcats");
    assert_eq!(started.phase, GamePhase::Setup);

    post(
        &router,
        "/api/game/lineup",
        json!({ "players": ["A", "B", "C", "D", "E"] }),
    )
    .await;
    post(
        &router,
        "/api/game/score",
        json!({ "team": "opponent", "points": 2 }),
    )
    .await;

    let lineup_set = rx.recv().await.unwrap();
    assert_eq!(lineup_set.phase, GamePhase::Match);
    let scored = rx.recv().await.unwrap();
    assert_eq!(scored.opponent_score, 2);
    assert_eq!(scored.current_quarter, Quarter::Q1);
    assert_eq!(scored.plays_logged, 1);
}

#[tokio::test]
async fn test_rejected_mutation_is_not_broadcast() {
    let (router, state) = started_game().await;
    let mut rx = state.subscribe();

    let (status, _) = post(&router, "/api/game/undo", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
