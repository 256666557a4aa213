//! Move commands and the reasons a move can be refused.
//!
//! Moves are domain events, not side effects. They represent the
//! player's intent and are validated against a session before anything
//! is written to the board.

use crate::types::{Player, Square};
use tracing::instrument;

/// A player placing their mark on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{} -> {}", player, square)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The square where the player places their mark.
    pub square: Square,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, square: Square) -> Self {
        Self { player, square }
    }
}

/// Why a move was refused.
///
/// Rejections are expected outcomes, not failures: they are returned by
/// value, never retried, and leave the session untouched. Variants are
/// listed in the order the rules check them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum Rejection {
    /// The match already reached a terminal status.
    #[display("Game is already finished")]
    GameAlreadyFinished,

    /// The mover is not the player whose turn it is.
    #[display("It's not player {}'s turn. Current turn: {}", player, current)]
    NotYourTurn {
        /// Who tried to move.
        player: Player,
        /// Whose turn it actually is.
        current: Player,
    },

    /// The square lies outside the 3x3 board.
    #[display("Square {} is outside the 3x3 board", _0)]
    InvalidSquare(#[error(not(source))] Square),

    /// The square already holds a mark.
    #[display("Cell at position {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Square),
}

impl Rejection {
    /// Stable machine-readable code used on the wire.
    pub fn code(&self) -> crate::wire::ErrorCode {
        use crate::wire::ErrorCode;
        match self {
            Rejection::GameAlreadyFinished => ErrorCode::GameAlreadyFinished,
            Rejection::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            Rejection::InvalidSquare(_) => ErrorCode::InvalidSquare,
            Rejection::SquareOccupied(_) => ErrorCode::SquareOccupied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let not_turn = Rejection::NotYourTurn {
            player: Player::O,
            current: Player::X,
        };
        assert_eq!(
            not_turn.to_string(),
            "It's not player O's turn. Current turn: X"
        );
        assert_eq!(
            Rejection::SquareOccupied(Square::new(1, 1)).to_string(),
            "Cell at position (1,1) is already occupied"
        );
    }

    #[test]
    fn test_move_display() {
        let mv = Move::new(Player::X, Square::new(2, 3));
        assert_eq!(mv.to_string(), "X -> (2,3)");
    }
}
