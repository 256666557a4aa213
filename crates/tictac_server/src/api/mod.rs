//! REST API over the session store.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST {prefix}/games/create` | [`handlers::create_game`] |
//! | `POST {prefix}/games/move` | [`handlers::make_move`] |
//! | `GET {prefix}/games/status?matchId=` | [`handlers::game_status`] |

mod error;
pub mod handlers;

pub use error::ApiError;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tracing::{debug, info, instrument};

use crate::store::SessionStore;

/// Builds the application router with the game routes under `prefix`.
///
/// An empty prefix (or `/`) mounts the routes at the root.
#[instrument(skip(store))]
pub fn router(store: SessionStore, prefix: &str) -> Router {
    let games = Router::new()
        .route("/games/create", post(handlers::create_game))
        .route("/games/move", post(handlers::make_move))
        .route("/games/status", get(handlers::game_status))
        .with_state(store);

    let app = if prefix.is_empty() || prefix == "/" {
        games
    } else {
        Router::new().nest(prefix, games)
    };

    info!(prefix, "Game routes mounted");
    app.layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    debug!(%method, %uri, "Incoming request");

    let response = next.run(request).await;
    info!(%method, %uri, status = %response.status(), "Request completed");
    response
}
