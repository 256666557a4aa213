//! Transport seam between the sync layer and the game server.

use tictac_core::{ErrorCode, GameSession, MatchId, MoveRequest};

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    /// The server refused a move under the game rules.
    #[display("{}", message)]
    Rejected {
        /// Rule that refused the move.
        code: ErrorCode,
        /// Server-provided explanation.
        message: String,
    },

    /// The server has no such match.
    #[display("{}", message)]
    NotFound {
        /// Server-provided explanation.
        message: String,
    },

    /// The server failed to handle an otherwise valid request.
    #[display("Server error {}: {}", status, message)]
    Server {
        /// HTTP status.
        status: u16,
        /// Server-provided explanation.
        message: String,
    },

    /// The request never produced a response.
    #[display("Transport error: {}", _0)]
    Transport(#[error(not(source))] String),

    /// The response, or the request, did not match the wire schema.
    #[display("Protocol error: {}", _0)]
    Protocol(#[error(not(source))] String),
}

/// Remote game operations.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// Creates a match and returns its initial snapshot.
    async fn create(&self) -> Result<GameSession, ApiError>;

    /// Reads the current snapshot of a match.
    async fn status(&self, match_id: MatchId) -> Result<GameSession, ApiError>;

    /// Submits a move and returns the resulting snapshot.
    async fn submit_move(&self, request: MoveRequest) -> Result<GameSession, ApiError>;
}
