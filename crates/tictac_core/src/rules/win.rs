//! Win detection logic for tic-tac-toe.

use crate::board::Board;
use crate::types::{Player, Square};

/// The eight winning lines as `(row, column)` triples.
pub const LINES: [[(i32, i32); 3]; 8] = [
    // Rows
    [(1, 1), (1, 2), (1, 3)],
    [(2, 1), (2, 2), (2, 3)],
    [(3, 1), (3, 2), (3, 3)],
    // Columns
    [(1, 1), (2, 1), (3, 1)],
    [(1, 2), (2, 2), (3, 2)],
    [(1, 3), (2, 3), (3, 3)],
    // Diagonals
    [(1, 1), (2, 2), (3, 3)],
    [(1, 3), (2, 2), (3, 1)],
];

/// Checks if there is a winner on the board.
///
/// Returns the symbol of the first line found fully occupied by one
/// player, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

/// Returns the player holding every cell of `line`.
pub(crate) fn line_owner(board: &Board, line: &[(i32, i32); 3]) -> Option<Player> {
    let [a, b, c] = (*line).map(|(row, column)| board.cell_at(Square::new(row, column)).ok());
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) if a == b && b == c => a.player(),
        _ => None,
    }
}
