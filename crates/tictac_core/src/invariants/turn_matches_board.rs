//! Turn invariant: the player to move follows from the marks on the board.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Player;

/// Invariant: `current_turn` agrees with the mark counts.
///
/// While in progress the player behind (or X when level) is to move.
/// Once terminal the turn is frozen at the last mover, which is X when
/// X leads and O when the counts are level.
pub struct TurnMatchesBoardInvariant;

impl Invariant<GameSession> for TurnMatchesBoardInvariant {
    fn holds(session: &GameSession) -> bool {
        let x = session.board().count(Player::X);
        let o = session.board().count(Player::O);
        let x_leads = x > o;

        let expected = if session.status().is_terminal() {
            if x_leads { Player::X } else { Player::O }
        } else if x_leads {
            Player::O
        } else {
            Player::X
        };

        session.current_turn() == expected
    }

    fn description() -> &'static str {
        "Current turn agrees with the marks on the board"
    }
}
