//! The 3x3 grid and its pure queries.

use crate::types::{CellValue, Player, Square};
use tracing::instrument;

/// A square named a row or column outside `[1, 3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Square {} is outside the 3x3 board", square)]
pub struct OutOfRange {
    /// The offending coordinate.
    pub square: Square,
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [CellValue; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [CellValue::Empty; 9],
        }
    }

    /// Gets the value at `square`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the row or column is not in `[1, 3]`.
    pub fn cell_at(&self, square: Square) -> Result<CellValue, OutOfRange> {
        square
            .index()
            .map(|idx| self.cells[idx])
            .ok_or(OutOfRange { square })
    }

    /// Sets the value at `square`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if the row or column is not in `[1, 3]`.
    pub fn set(&mut self, square: Square, value: CellValue) -> Result<(), OutOfRange> {
        let idx = square.index().ok_or(OutOfRange { square })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Checks if no cell is empty.
    #[instrument(skip(self))]
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }

    /// Returns the player holding a complete line, if any.
    #[instrument(skip(self))]
    pub fn winner(&self) -> Option<Player> {
        crate::rules::check_winner(self)
    }

    /// Number of cells marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        let mark = CellValue::from(player);
        self.cells.iter().filter(|c| **c == mark).count()
    }

    /// Number of occupied cells.
    ///
    /// Each accepted move fills exactly one cell, so this orders snapshots
    /// of the same match.
    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Iterates `(square, value)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Square, CellValue)> + '_ {
        Square::all().zip(self.cells.iter().copied())
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (idx, value) in self.cells.iter().enumerate() {
            let symbol = match value {
                CellValue::Empty => ".",
                CellValue::X => "X",
                CellValue::O => "O",
            };
            result.push_str(symbol);
            match idx % 3 {
                2 if idx < 8 => result.push_str("\n-+-+-\n"),
                2 => {}
                _ => result.push('|'),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.move_count(), 0);
        assert!(board.cells().all(|(_, v)| v == CellValue::Empty));
        assert_eq!(board.cells().count(), 9);
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let board = Board::new();
        let err = board.cell_at(Square::new(0, 2)).unwrap_err();
        assert_eq!(err.square, Square::new(0, 2));
        assert!(board.cell_at(Square::new(3, 3)).is_ok());
    }

    #[test]
    fn test_set_and_count() {
        let mut board = Board::new();
        board.set(Square::new(2, 2), CellValue::X).unwrap();
        board.set(Square::new(1, 3), CellValue::O).unwrap();
        assert_eq!(board.cell_at(Square::new(2, 2)).unwrap(), CellValue::X);
        assert_eq!(board.count(Player::X), 1);
        assert_eq!(board.count(Player::O), 1);
        assert_eq!(board.move_count(), 2);
    }

    #[test]
    fn test_display_layout() {
        let mut board = Board::new();
        board.set(Square::new(1, 1), CellValue::X).unwrap();
        board.set(Square::new(3, 3), CellValue::O).unwrap();
        assert_eq!(board.display(), "X|.|.\n-+-+-\n.|.|.\n-+-+-\n.|.|O");
    }
}
