//! Contract-based validation for moves.
//!
//! Each precondition is a small named check. [`LegalMove`] composes them
//! in a fixed order so that a caller can always tell which rule refused
//! a move; the first failing check wins.

use crate::action::{Move, Rejection};
use crate::session::GameSession;
use tracing::{debug, instrument};

/// Precondition: the match has not reached a terminal status.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Checks the precondition.
    pub fn check(_mov: &Move, session: &GameSession) -> Result<(), Rejection> {
        if session.status().is_terminal() {
            Err(Rejection::GameAlreadyFinished)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), Rejection> {
        if mov.player != session.current_turn() {
            Err(Rejection::NotYourTurn {
                player: mov.player,
                current: session.current_turn(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square lies on the board.
pub struct SquareInRange;

impl SquareInRange {
    /// Checks the precondition.
    pub fn check(mov: &Move, _session: &GameSession) -> Result<(), Rejection> {
        if mov.square.in_range() {
            Ok(())
        } else {
            Err(Rejection::InvalidSquare(mov.square))
        }
    }
}

/// Precondition: the square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks the precondition.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), Rejection> {
        match session.board().cell_at(mov.square) {
            Ok(value) if value.is_empty() => Ok(()),
            Ok(_) => Err(Rejection::SquareOccupied(mov.square)),
            Err(_) => Err(Rejection::InvalidSquare(mov.square)),
        }
    }
}

/// Composite precondition: finished, turn, range, occupancy, in that order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session), fields(match_id = %session.id()))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), Rejection> {
        MatchInProgress::check(mov, session)?;
        PlayersTurn::check(mov, session)?;
        SquareInRange::check(mov, session)?;
        SquareIsEmpty::check(mov, session)?;
        debug!("Move passed preconditions");
        Ok(())
    }
}
