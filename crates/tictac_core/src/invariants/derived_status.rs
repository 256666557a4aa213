//! Derived status invariant: status is a pure function of the board.

use super::Invariant;
use crate::rules::derive_status;
use crate::session::GameSession;

/// Invariant: the recorded status equals the status the board implies.
pub struct DerivedStatusInvariant;

impl Invariant<GameSession> for DerivedStatusInvariant {
    fn holds(session: &GameSession) -> bool {
        derive_status(session.board()) == session.status()
    }

    fn description() -> &'static str {
        "Status matches the status derived from the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, GameStatus, Square};
    use crate::MatchId;

    #[test]
    fn test_new_session_holds() {
        let session = GameSession::new(MatchId::from(7));
        assert!(DerivedStatusInvariant::holds(&session));
    }

    #[test]
    fn test_stale_status_violates() {
        let mut session = GameSession::new(MatchId::from(7));
        for column in 1..=3 {
            session
                .board_mut()
                .set(Square::new(1, column), CellValue::X)
                .unwrap();
        }
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(!DerivedStatusInvariant::holds(&session));
    }
}
