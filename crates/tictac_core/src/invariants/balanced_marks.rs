//! Balanced marks invariant: X is never behind O and never two ahead.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Player;

/// Invariant: `count(X) - count(O)` is 0 or 1.
///
/// X always moves first and players alternate, so X leads by one after
/// its own move and the counts are level after O's.
pub struct BalancedMarksInvariant;

impl Invariant<GameSession> for BalancedMarksInvariant {
    fn holds(session: &GameSession) -> bool {
        let x = session.board().count(Player::X);
        let o = session.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count minus O count is 0 or 1"
    }
}
