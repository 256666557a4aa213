//! Process-local record of who this client is playing as.

use derive_getters::Getters;
use std::sync::{Arc, PoisonError, RwLock};
use tictac_core::{MatchId, Player};
use tracing::{debug, instrument};

/// The locally selected symbol and the match it is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Identity {
    /// Symbol submitted with moves.
    player: Player,
    /// Match this client is attached to, if any.
    active_match: Option<MatchId>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            player: Player::X,
            active_match: None,
        }
    }
}

/// Shared handle to an [`Identity`].
///
/// Clones share one record. Separate `IdentityStore::new()` calls never do,
/// so tests and parallel clients stay isolated.
#[derive(Debug, Clone, Default)]
pub struct IdentityStore {
    inner: Arc<RwLock<Identity>>,
}

impl IdentityStore {
    /// Creates a store holding the default identity (X, no match).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current identity.
    pub fn identity(&self) -> Identity {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches the local symbol.
    #[instrument(skip(self))]
    pub fn select_player(&self, player: Player) {
        debug!("Selecting player");
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .player = player;
    }

    /// Attaches to a match.
    #[instrument(skip(self))]
    pub fn set_active_match(&self, match_id: MatchId) {
        debug!("Setting active match");
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .active_match = Some(match_id);
    }

    /// Back to X with no match.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        debug!("Resetting identity");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Identity::default();
    }
}
