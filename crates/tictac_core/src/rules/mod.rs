//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are separated from board
//! storage so the session state machine and the invariant checks share
//! a single definition of "won" and "drawn".

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use crate::board::Board;
use crate::types::GameStatus;
use tracing::instrument;

/// Derives the status a board implies.
///
/// A completed line wins; otherwise a full board is a draw; otherwise
/// the game is still in progress.
#[instrument(skip(board))]
pub fn derive_status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        return GameStatus::won_by(winner);
    }
    if is_full(board) {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, Square};

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(derive_status(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_o_win_derives_o_won() {
        let mut board = Board::new();
        for column in 1..=3 {
            board.set(Square::new(2, column), CellValue::O).unwrap();
        }
        board.set(Square::new(1, 1), CellValue::X).unwrap();
        board.set(Square::new(1, 2), CellValue::X).unwrap();
        board.set(Square::new(3, 3), CellValue::X).unwrap();
        assert_eq!(derive_status(&board), GameStatus::OWon);
    }
}
