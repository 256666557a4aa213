//! Session store: one authoritative game session per match id.
//!
//! Sessions live in a map of per-match async mutexes. The map lock is held
//! only long enough to find or insert an entry, so moves on different
//! matches never wait on each other, while moves on the same match are
//! applied one at a time. Reads take the same per-match lock and clone,
//! so they always see a whole move or none of it.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tictac_core::{
    GameSession, InvariantViolation, MatchId, Player, Rejection, Square, check_session,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

/// Errors returned by [`SessionStore`] operations.
///
/// `NotFound` and `Rejected` are expected outcomes of a request. The
/// remaining variants are store failures and are reported as such.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// No session exists for the id.
    #[display("Game with id {} not found", _0)]
    NotFound(#[error(not(source))] MatchId),

    /// The rules refused the move.
    #[display("{}", _0)]
    Rejected(Rejection),

    /// The configured session limit was reached.
    #[display("Session store is full ({} sessions)", limit)]
    CapacityExceeded {
        /// Configured maximum.
        limit: usize,
    },

    /// No fresh match id can be allocated.
    #[display("Match ids exhausted")]
    IdsExhausted,

    /// A move produced a session that breaks an invariant; it was not stored.
    #[display("Game {} is corrupted: {}", match_id, violation)]
    Corrupted {
        /// Affected match.
        match_id: MatchId,
        /// What broke.
        violation: InvariantViolation,
    },
}

impl StoreError {
    /// Checks if this error is a store failure rather than a request outcome.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, StoreError::NotFound(_) | StoreError::Rejected(_))
    }
}

impl From<Rejection> for StoreError {
    fn from(rejection: Rejection) -> Self {
        StoreError::Rejected(rejection)
    }
}

#[derive(Debug)]
struct Inner {
    sessions: RwLock<HashMap<MatchId, Arc<Mutex<GameSession>>>>,
    next_id: AtomicU64,
    max_sessions: Option<usize>,
}

/// Owns every live session. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates an unbounded store.
    #[instrument]
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Creates a store holding at most `max_sessions` sessions.
    #[instrument]
    pub fn with_limit(max_sessions: Option<usize>) -> Self {
        info!(?max_sessions, "Creating session store");
        Self {
            inner: Arc::new(Inner {
                sessions: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                max_sessions,
            }),
        }
    }

    /// Allocates a new session with a fresh id and returns its initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CapacityExceeded`] or [`StoreError::IdsExhausted`].
    #[instrument(skip(self))]
    pub async fn create(&self) -> Result<GameSession, StoreError> {
        let mut sessions = self.inner.sessions.write().await;

        if let Some(limit) = self.inner.max_sessions
            && sessions.len() >= limit
        {
            warn!(limit, "Session limit reached");
            return Err(StoreError::CapacityExceeded { limit });
        }

        let raw = self
            .inner
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| {
                error!("Match id counter overflowed");
                StoreError::IdsExhausted
            })?;
        let id = MatchId::from(raw);

        let session = GameSession::new(id);
        sessions.insert(id, Arc::new(Mutex::new(session.clone())));

        info!(match_id = %id, total = sessions.len(), "Created new session");
        Ok(session)
    }

    /// Returns a consistent snapshot of the session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub async fn get_status(&self, id: MatchId) -> Result<GameSession, StoreError> {
        let slot = self.slot(id).await?;
        let session = slot.lock().await.clone();
        debug!(
            match_id = %id,
            status = %session.status(),
            moves = session.move_count(),
            "Read session"
        );
        Ok(session)
    }

    /// Validates and applies a move, storing the result on success.
    ///
    /// The per-match lock is held from validation through commit, so two
    /// concurrent moves on one match are serialized and the second one is
    /// judged against the first one's result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`], [`StoreError::Rejected`] with the
    /// rule that refused the move, or [`StoreError::Corrupted`].
    #[instrument(skip(self))]
    pub async fn apply_move(
        &self,
        id: MatchId,
        player: Player,
        square: Square,
    ) -> Result<GameSession, StoreError> {
        let slot = self.slot(id).await?;
        let mut current = slot.lock().await;

        let next = current.apply_move(player, square).map_err(|rejection| {
            warn!(match_id = %id, %player, %square, reason = %rejection, "Move rejected");
            StoreError::Rejected(rejection)
        })?;

        check_session(&next).map_err(|violation| {
            error!(match_id = %id, %violation, "Move produced an invalid session; not stored");
            StoreError::Corrupted {
                match_id: id,
                violation,
            }
        })?;

        *current = next.clone();
        info!(
            match_id = %id,
            %player,
            %square,
            status = %next.status(),
            "Move successful"
        );
        Ok(next)
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.inner.sessions.read().await.len()
    }

    /// Checks if the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, id: MatchId) -> Result<Arc<Mutex<GameSession>>, StoreError> {
        let sessions = self.inner.sessions.read().await;
        sessions.get(&id).cloned().ok_or_else(|| {
            debug!(match_id = %id, "Session not found");
            StoreError::NotFound(id)
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
