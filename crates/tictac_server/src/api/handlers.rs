//! Request handlers for the game routes.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{OriginalUri, Query, State};
use tictac_core::{GameSession, MoveRequest, Square, StatusQuery};
use tracing::{debug, info, instrument};

use super::error::ApiError;
use crate::store::SessionStore;

/// `POST /games/create`
#[instrument(skip_all)]
pub async fn create_game(
    State(store): State<SessionStore>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<GameSession>, ApiError> {
    info!("Creating new game");
    let session = store
        .create()
        .await
        .map_err(|e| ApiError::from_store(e, uri.path()))?;
    Ok(Json(session))
}

/// `POST /games/move`
#[instrument(skip_all)]
pub async fn make_move(
    State(store): State<SessionStore>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameSession>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "Malformed move request");
        ApiError::bad_request(e.body_text(), uri.path())
    })?;

    info!(
        match_id = %request.match_id,
        player = %request.player_id,
        x = request.square.x,
        y = request.square.y,
        "Making move"
    );
    let session = store
        .apply_move(
            request.match_id,
            request.player_id,
            Square::from(request.square),
        )
        .await
        .map_err(|e| ApiError::from_store(e, uri.path()))?;
    Ok(Json(session))
}

/// `GET /games/status?matchId=<id>`
#[instrument(skip_all)]
pub async fn game_status(
    State(store): State<SessionStore>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<GameSession>, ApiError> {
    let Query(query) = query.map_err(|e| {
        debug!(error = %e, "Malformed status query");
        ApiError::bad_request(e.body_text(), uri.path())
    })?;

    debug!(match_id = %query.match_id, "Getting game status");
    let session = store
        .get_status(query.match_id)
        .await
        .map_err(|e| ApiError::from_store(e, uri.path()))?;
    Ok(Json(session))
}
