//! Client synchronization layer.
//!
//! Keeps a non-authoritative cache of the last snapshot seen per match and
//! routes every read through [`SyncClient::fetch_status`]. A move submission
//! is always followed by a refresh, whether or not the move was accepted,
//! and only one submission per match may be outstanding at a time.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use tictac_core::{ErrorCode, GameSession, MatchId, MoveRequest, Player, Rejection, Square};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, GameApi};
use crate::identity::IdentityStore;

/// Errors surfaced by [`SyncClient`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClientError {
    /// The server refused the move.
    #[display("{}", message)]
    Rejected {
        /// Match the move was for.
        match_id: MatchId,
        /// Rule that refused it.
        code: ErrorCode,
        /// Server text, shown verbatim.
        message: String,
    },

    /// The cached view already shows the move is illegal; nothing was sent.
    #[display("{}", _0)]
    Precheck(Rejection),

    /// The server has no such match.
    #[display("Game with id {} not found", _0)]
    NotFound(#[error(not(source))] MatchId),

    /// No usable response from the server.
    #[display("{}", _0)]
    Transport(#[error(not(source))] String),

    /// The server answered with something outside the wire schema.
    #[display("{}", _0)]
    Protocol(#[error(not(source))] String),

    /// Another move for this match has not resolved yet.
    #[display("A move for game {} is already in flight", _0)]
    MoveInFlight(#[error(not(source))] MatchId),

    /// The move was accepted but the follow-up refresh failed.
    #[display("Move accepted in game {} but refresh failed: {}", match_id, reason)]
    Unconfirmed {
        /// Match the move was for.
        match_id: MatchId,
        /// Why the refresh failed.
        reason: String,
    },

    /// Polling gave up before the match changed.
    #[display("Game {} did not change after {} polls", match_id, polls)]
    Timeout {
        /// Match being watched.
        match_id: MatchId,
        /// Polls attempted.
        polls: u32,
    },
}

impl ClientError {
    fn from_api(err: ApiError, match_id: MatchId) -> Self {
        match err {
            ApiError::Rejected { code, message } => ClientError::Rejected {
                match_id,
                code,
                message,
            },
            ApiError::NotFound { .. } => ClientError::NotFound(match_id),
            ApiError::Server { .. } | ApiError::Transport(_) => {
                ClientError::Transport(err.to_string())
            }
            ApiError::Protocol(message) => ClientError::Protocol(message),
        }
    }

    /// Text to show the user.
    ///
    /// Rule violations are shown as written; infrastructure failures get a
    /// generic line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Precheck(rejection) => rejection.to_string(),
            ClientError::NotFound(_) => self.to_string(),
            ClientError::MoveInFlight(_) => "Please wait for your last move".to_string(),
            ClientError::Unconfirmed { .. } => {
                "Move sent, but the board could not be refreshed".to_string()
            }
            ClientError::Timeout { .. } => "Still waiting for the other player".to_string(),
            ClientError::Transport(_) | ClientError::Protocol(_) => {
                "Something went wrong".to_string()
            }
        }
    }

    /// Checks if the server (or the local pre-check) refused the move.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::Rejected { .. } | ClientError::Precheck(_)
        )
    }
}

/// A cached snapshot paired with the local symbol.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SessionView {
    /// Last snapshot seen.
    session: GameSession,
    /// Locally selected symbol.
    player: Player,
}

impl SessionView {
    /// Checks if the local player is to move in an unfinished match.
    pub fn is_my_turn(&self) -> bool {
        !self.session.status().is_terminal() && self.session.current_turn() == self.player
    }
}

/// Clears the in-flight mark for a match when dropped.
struct InFlight<'a> {
    pending: &'a Mutex<HashSet<MatchId>>,
    match_id: MatchId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.pending).remove(&self.match_id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Synchronizing client over a [`GameApi`].
#[derive(Debug)]
pub struct SyncClient<A> {
    api: A,
    identity: IdentityStore,
    cache: Mutex<HashMap<MatchId, GameSession>>,
    pending: Mutex<HashSet<MatchId>>,
    precheck: bool,
}

impl<A: GameApi> SyncClient<A> {
    /// Creates a client with the local pre-check enabled.
    pub fn new(api: A, identity: IdentityStore) -> Self {
        Self {
            api,
            identity,
            cache: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashSet::new()),
            precheck: true,
        }
    }

    /// Enables or disables the local pre-check.
    pub fn with_precheck(mut self, enabled: bool) -> Self {
        self.precheck = enabled;
        self
    }

    /// Identity handle this client records into.
    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    /// Underlying transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Last snapshot seen for a match, without contacting the server.
    pub fn cached(&self, match_id: MatchId) -> Option<GameSession> {
        lock(&self.cache).get(&match_id).cloned()
    }

    /// Cached snapshot paired with the local symbol.
    pub fn view(&self, match_id: MatchId) -> Option<SessionView> {
        self.cached(match_id)
            .map(|session| SessionView::new(session, *self.identity.identity().player()))
    }

    /// Creates a match and attaches the local identity to it.
    #[instrument(skip(self))]
    pub async fn create_session(&self) -> Result<MatchId, ClientError> {
        let session = self.api.create().await.map_err(|e| match e {
            ApiError::Protocol(message) => ClientError::Protocol(message),
            other => ClientError::Transport(other.to_string()),
        })?;
        let match_id = session.id();
        self.identity.set_active_match(match_id);
        self.observe(session);
        info!(%match_id, "Created session");
        Ok(match_id)
    }

    /// Resets the local identity and starts a fresh match.
    #[instrument(skip(self))]
    pub async fn new_game(&self) -> Result<MatchId, ClientError> {
        self.identity.reset();
        self.create_session().await
    }

    /// Reads the authoritative snapshot and refreshes the cache.
    ///
    /// Returns the newest snapshot known for the match: a response older
    /// than the cached view is discarded in favor of the cache.
    #[instrument(skip(self))]
    pub async fn fetch_status(&self, match_id: MatchId) -> Result<GameSession, ClientError> {
        match self.api.status(match_id).await {
            Ok(session) => Ok(self.observe(session)),
            Err(e) => {
                let err = ClientError::from_api(e, match_id);
                if matches!(err, ClientError::NotFound(_)) {
                    lock(&self.cache).remove(&match_id);
                }
                Err(err)
            }
        }
    }

    /// Submits a move, then refreshes the match.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Precheck`] when the cached view rules the move out; a
    ///   not-your-turn verdict is re-checked against a fresh status first
    /// - [`ClientError::MoveInFlight`] when another submission for the match is pending
    /// - [`ClientError::Rejected`] when the server refuses the move
    /// - [`ClientError::Unconfirmed`] when the move went through but the refresh did not
    #[instrument(skip(self))]
    pub async fn submit_move(
        &self,
        match_id: MatchId,
        player: Player,
        square: Square,
    ) -> Result<GameSession, ClientError> {
        if self.precheck {
            self.precheck_move(match_id, player, square).await?;
        }

        let _in_flight = self.begin_move(match_id)?;

        let request = MoveRequest {
            match_id,
            player_id: player,
            square: square.into(),
        };
        let outcome = self.api.submit_move(request).await;
        let refreshed = self.fetch_status(match_id).await;

        match (outcome, refreshed) {
            (Ok(_), Ok(session)) => {
                info!(status = %session.status(), "Move confirmed");
                Ok(session)
            }
            (Ok(_), Err(e)) => {
                warn!(error = %e, "Move accepted but refresh failed");
                Err(ClientError::Unconfirmed {
                    match_id,
                    reason: e.to_string(),
                })
            }
            (Err(e), _) => {
                let err = ClientError::from_api(e, match_id);
                warn!(error = %err, "Move failed");
                Err(err)
            }
        }
    }

    /// Polls until the match gains a move or ends.
    ///
    /// Returns immediately if the match is already over.
    #[instrument(skip(self))]
    pub async fn await_change(
        &self,
        match_id: MatchId,
        interval: Duration,
        max_polls: u32,
    ) -> Result<GameSession, ClientError> {
        let baseline = match self.cached(match_id) {
            Some(session) => session,
            None => self.fetch_status(match_id).await?,
        };
        if baseline.status().is_terminal() {
            return Ok(baseline);
        }

        for poll in 1..=max_polls {
            tokio::time::sleep(interval).await;
            let current = self.fetch_status(match_id).await?;
            if current.move_count() > baseline.move_count() || current.status().is_terminal() {
                debug!(poll, moves = current.move_count(), "Match changed");
                return Ok(current);
            }
        }

        Err(ClientError::Timeout {
            match_id,
            polls: max_polls,
        })
    }

    /// Runs the rules against the cached snapshot.
    ///
    /// A turn mismatch may only mean the cache missed the opponent's move, so
    /// that verdict is retried once on a fresh snapshot before refusing.
    async fn precheck_move(
        &self,
        match_id: MatchId,
        player: Player,
        square: Square,
    ) -> Result<(), ClientError> {
        let Some(cached) = self.cached(match_id) else {
            return Ok(());
        };
        let verdict = match cached.apply_move(player, square) {
            Ok(_) => return Ok(()),
            Err(Rejection::NotYourTurn { .. }) => {
                debug!(moves = cached.move_count(), "Cached turn disagrees, refreshing");
                self.fetch_status(match_id)
                    .await?
                    .apply_move(player, square)
                    .map(|_| ())
            }
            Err(rejection) => Err(rejection),
        };
        verdict.map_err(|rejection| {
            warn!(%rejection, "Move refused by local pre-check");
            ClientError::Precheck(rejection)
        })
    }

    fn begin_move(&self, match_id: MatchId) -> Result<InFlight<'_>, ClientError> {
        if !lock(&self.pending).insert(match_id) {
            warn!(%match_id, "Move already in flight");
            return Err(ClientError::MoveInFlight(match_id));
        }
        Ok(InFlight {
            pending: &self.pending,
            match_id,
        })
    }

    /// Replaces the cached snapshot unless `session` is older than it.
    fn observe(&self, session: GameSession) -> GameSession {
        let mut cache = lock(&self.cache);
        match cache.get(&session.id()) {
            Some(cached) if cached.move_count() > session.move_count() => {
                warn!(
                    match_id = %session.id(),
                    cached = cached.move_count(),
                    received = session.move_count(),
                    "Discarding stale snapshot"
                );
                cached.clone()
            }
            _ => {
                cache.insert(session.id(), session.clone());
                session
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_keeps_rule_text() {
        let err = ClientError::Rejected {
            match_id: MatchId::from(1),
            code: ErrorCode::SquareOccupied,
            message: "Cell at position (1,1) is already occupied".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Cell at position (1,1) is already occupied"
        );
        assert!(err.is_rejection());
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "Something went wrong");
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_api_errors_keep_categories() {
        let id = MatchId::from(2);
        assert_eq!(
            ClientError::from_api(
                ApiError::NotFound {
                    message: "gone".to_string()
                },
                id
            ),
            ClientError::NotFound(id)
        );
        assert!(matches!(
            ClientError::from_api(
                ApiError::Server {
                    status: 503,
                    message: "full".to_string()
                },
                id
            ),
            ClientError::Transport(_)
        ));
    }

    #[test]
    fn test_view_reports_turn() {
        let session = GameSession::new(MatchId::from(1));
        assert!(SessionView::new(session.clone(), Player::X).is_my_turn());
        assert!(!SessionView::new(session, Player::O).is_my_turn());
    }
}
