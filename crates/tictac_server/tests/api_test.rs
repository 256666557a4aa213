//! HTTP tests for the game routes, driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tictac_server::{SessionStore, router};
use tower::ServiceExt;

fn app() -> Router {
    router(SessionStore::new(), "/api")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn create() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/games/create")
        .body(Body::empty())
        .unwrap()
}

fn status(match_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/games/status?matchId={}", match_id))
        .body(Body::empty())
        .unwrap()
}

fn move_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/games/move")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn play(match_id: u64, player: &str, x: i32, y: i32) -> Request<Body> {
    move_request(json!({"matchId": match_id, "playerId": player, "square": {"x": x, "y": y}}))
}

#[tokio::test]
async fn test_create_returns_fresh_snapshot() {
    let app = app();
    let (code, body) = send(&app, create()).await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["status"], json!("IN_PROGRESS"));
    assert_eq!(body["currentTurn"], json!("X"));
    let board = body["board"].as_array().unwrap();
    assert_eq!(board.len(), 9);
    assert!(board.iter().all(|cell| cell["value"] == json!("EMPTY")));
}

#[tokio::test]
async fn test_move_then_status_agree() {
    let app = app();
    send(&app, create()).await;

    let (code, moved) = send(&app, play(1, "X", 2, 3)).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(moved["currentTurn"], json!("O"));
    assert_eq!(moved["board"][5], json!({"row": 2, "column": 3, "value": "X"}));

    let (code, read) = send(&app, status("1")).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(read, moved);
}

#[tokio::test]
async fn test_rejection_uses_error_envelope() {
    let app = app();
    send(&app, create()).await;

    let (code, body) = send(&app, play(1, "O", 1, 1)).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));
    assert_eq!(body["error"], json!("Bad Request"));
    assert_eq!(body["code"], json!("NOT_YOUR_TURN"));
    assert_eq!(
        body["message"],
        json!("It's not player O's turn. Current turn: X")
    );
    assert_eq!(body["path"], json!("/api/games/move"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_each_rejection_has_its_code() {
    let app = app();
    send(&app, create()).await;

    let (_, body) = send(&app, play(1, "X", 0, 2)).await;
    assert_eq!(body["code"], json!("INVALID_SQUARE"));

    send(&app, play(1, "X", 1, 1)).await;
    let (_, body) = send(&app, play(1, "O", 1, 1)).await;
    assert_eq!(body["code"], json!("SQUARE_OCCUPIED"));
    assert_eq!(
        body["message"],
        json!("Cell at position (1,1) is already occupied")
    );
}

#[tokio::test]
async fn test_coordinates_beyond_i32_are_invalid_square() {
    let app = app();
    send(&app, create()).await;

    for square in [json!({"x": 4294967296_i64, "y": 1}), json!({"x": 2, "y": -9000000000_i64})] {
        let (code, body) = send(
            &app,
            move_request(json!({"matchId": 1, "playerId": "X", "square": square})),
        )
        .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_SQUARE"));
    }

    let (_, body) = send(&app, status("1")).await;
    assert!(body["board"]
        .as_array()
        .unwrap()
        .iter()
        .all(|cell| cell["value"] == json!("EMPTY")));
}

#[tokio::test]
async fn test_finished_game_rejects_moves() {
    let app = app();
    send(&app, create()).await;
    for (player, x, y) in [("X", 1, 1), ("O", 2, 1), ("X", 1, 2), ("O", 2, 2), ("X", 1, 3)] {
        let (code, _) = send(&app, play(1, player, x, y)).await;
        assert_eq!(code, StatusCode::OK);
    }

    let (_, body) = send(&app, status("1")).await;
    assert_eq!(body["status"], json!("X_WON"));

    let (code, body) = send(&app, play(1, "O", 3, 3)).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("GAME_ALREADY_FINISHED"));
    assert_eq!(body["message"], json!("Game is already finished"));
}

#[tokio::test]
async fn test_unknown_match_is_not_found() {
    let app = app();

    let (code, body) = send(&app, status("42")).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("GAME_NOT_FOUND"));

    let (code, _) = send(&app, play(42, "X", 1, 1)).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_request() {
    let app = app();
    send(&app, create()).await;

    let (code, body) = send(&app, status("abc")).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("BAD_REQUEST"));

    let missing = Request::builder()
        .uri("/api/games/status")
        .body(Body::empty())
        .unwrap();
    let (code, _) = send(&app, missing).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, body) = send(&app, move_request(json!({"matchId": 1, "playerId": "Z"}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn test_capacity_exhaustion_is_unavailable() {
    let app = router(SessionStore::with_limit(Some(1)), "/api");
    send(&app, create()).await;

    let (code, body) = send(&app, create()).await;
    assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("STORE_UNAVAILABLE"));
}

#[tokio::test]
async fn test_routes_at_root_without_prefix() {
    let app = router(SessionStore::new(), "");
    let request = Request::builder()
        .method("POST")
        .uri("/games/create")
        .body(Body::empty())
        .unwrap();
    let (code, _) = send(&app, request).await;
    assert_eq!(code, StatusCode::OK);
}
