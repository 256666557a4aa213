//! The authoritative game-session state machine.
//!
//! A session moves from `InProgress` to one of `XWon`, `OWon`, or `Draw`
//! and never leaves a terminal status. The only mutation is
//! [`GameSession::apply_move`], which either returns the next session or a
//! [`Rejection`] and never leaves a half-applied move behind.

use crate::action::{Move, Rejection};
use crate::board::Board;
use crate::contracts::LegalMove;
use crate::rules::derive_status;
use crate::types::{CellValue, GameStatus, Player, Square};
use crate::wire::SessionSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Integer identifier of a match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MatchId(u64);

/// One match: board, player to move, status, and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SessionSnapshot", try_from = "SessionSnapshot")]
pub struct GameSession {
    id: MatchId,
    board: Board,
    current_turn: Player,
    status: GameStatus,
    created_at: DateTime<Utc>,
}

impl GameSession {
    /// Creates a session with an empty board, X to move, created now.
    #[instrument]
    pub fn new(id: MatchId) -> Self {
        Self::new_at(id, Utc::now())
    }

    /// Creates a session with an explicit creation time.
    pub fn new_at(id: MatchId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            board: Board::new(),
            current_turn: Player::X,
            status: GameStatus::InProgress,
            created_at,
        }
    }

    /// Reassembles a session from its parts without validation.
    ///
    /// Callers decoding untrusted data should follow up with
    /// [`crate::invariants::check_session`].
    pub(crate) fn from_parts(
        id: MatchId,
        board: Board,
        current_turn: Player,
        status: GameStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            board,
            current_turn,
            status,
            created_at,
        }
    }

    /// Returns the match id.
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (frozen at the last mover once terminal).
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Returns the status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns when the match was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of moves applied so far.
    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    /// Validates and applies a move, returning the next session.
    ///
    /// Checks run in a fixed order: finished game, wrong player, square
    /// off the board, occupied square. `self` is never modified.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] that applies.
    #[instrument(skip(self), fields(match_id = %self.id, turn = %self.current_turn))]
    pub fn apply_move(&self, player: Player, square: Square) -> Result<Self, Rejection> {
        let mov = Move::new(player, square);
        LegalMove::check(&mov, self)?;

        let mut next = self.clone();
        next.board
            .set(square, CellValue::from(player))
            .map_err(|e| Rejection::InvalidSquare(e.square))?;
        next.status = derive_status(&next.board);

        if next.status.is_terminal() {
            info!(status = %next.status, moves = next.move_count(), "Match finished");
        } else {
            next.current_turn = player.opponent();
            debug!(next_turn = %next.current_turn, "Turn passed");
        }

        Ok(next)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(session: GameSession, moves: &[(Player, i32, i32)]) -> GameSession {
        moves.iter().fold(session, |s, (p, r, c)| {
            s.apply_move(*p, Square::new(*r, *c)).expect("legal move")
        })
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(MatchId::from(1));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_turn(), Player::X);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_apply_move_does_not_touch_original() {
        let session = GameSession::new(MatchId::from(1));
        let next = session.apply_move(Player::X, Square::new(1, 1)).unwrap();
        assert_eq!(session.move_count(), 0);
        assert_eq!(next.move_count(), 1);
        assert_eq!(next.current_turn(), Player::O);
    }

    #[test]
    fn test_turn_frozen_at_winner() {
        let session = play(
            GameSession::new(MatchId::from(1)),
            &[
                (Player::X, 1, 1),
                (Player::O, 1, 2),
                (Player::X, 2, 1),
                (Player::O, 2, 2),
                (Player::X, 3, 3),
                (Player::O, 3, 2),
            ],
        );
        assert_eq!(session.status(), GameStatus::OWon);
        assert_eq!(session.current_turn(), Player::O);
    }

}
