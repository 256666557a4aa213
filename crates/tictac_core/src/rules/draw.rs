//! Draw detection logic for tic-tac-toe.

use crate::board::Board;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    board.cells().all(|(_, value)| !value.is_empty())
}
