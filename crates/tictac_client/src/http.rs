//! reqwest implementation of [`GameApi`].

use std::time::Duration;

use reqwest::{Response, StatusCode};
use tictac_core::{ErrorBody, ErrorCode, GameSession, MatchId, MoveRequest, StatusQuery};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, GameApi};

/// Talks to the REST API at `base_url`, e.g. `http://127.0.0.1:8080/api`.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameApi {
    /// Creates a client with the given per-request timeout.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/games/{}", self.base_url, route)
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    warn!(error = %err, "Request failed");
    ApiError::Transport(err.to_string())
}

/// Turns a response into a snapshot or a classified error.
async fn decode(response: Response) -> Result<GameSession, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<GameSession>()
            .await
            .map_err(|e| ApiError::Protocol(format!("Invalid game snapshot: {}", e)));
    }

    let text = response.text().await.map_err(transport)?;
    debug!(%status, body = %text, "Error response");

    let Ok(body) = serde_json::from_str::<ErrorBody>(&text) else {
        return Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { message: text },
            _ => ApiError::Server {
                status: status.as_u16(),
                message: text,
            },
        });
    };

    Err(match body.code {
        ErrorCode::GameAlreadyFinished
        | ErrorCode::NotYourTurn
        | ErrorCode::InvalidSquare
        | ErrorCode::SquareOccupied => ApiError::Rejected {
            code: body.code,
            message: body.message,
        },
        ErrorCode::GameNotFound => ApiError::NotFound {
            message: body.message,
        },
        ErrorCode::BadRequest => ApiError::Protocol(body.message),
        ErrorCode::StoreUnavailable | ErrorCode::SessionCorrupted => ApiError::Server {
            status: body.status,
            message: body.message,
        },
    })
}

#[async_trait::async_trait]
impl GameApi for HttpGameApi {
    #[instrument(skip(self))]
    async fn create(&self) -> Result<GameSession, ApiError> {
        info!("Creating game via REST");
        let response = self
            .client
            .post(self.url("create"))
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self), fields(match_id = %match_id))]
    async fn status(&self, match_id: MatchId) -> Result<GameSession, ApiError> {
        debug!("Getting game status via REST");
        let response = self
            .client
            .get(self.url("status"))
            .query(&StatusQuery { match_id })
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self), fields(match_id = %request.match_id, player = %request.player_id))]
    async fn submit_move(&self, request: MoveRequest) -> Result<GameSession, ApiError> {
        info!("Submitting move via REST");
        let response = self
            .client
            .post(self.url("move"))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}
