//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Contents of one cell on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CellValue {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Marked by X.
    X,
    /// Marked by O.
    O,
}

impl CellValue {
    /// Returns the player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            CellValue::Empty => None,
            CellValue::X => Some(Player::X),
            CellValue::O => Some(Player::O),
        }
    }

    /// Checks if nobody has played in this cell.
    pub fn is_empty(self) -> bool {
        self == CellValue::Empty
    }
}

impl From<Player> for CellValue {
    fn from(player: Player) -> Self {
        match player {
            Player::X => CellValue::X,
            Player::O => CellValue::O,
        }
    }
}

/// A `(row, column)` coordinate, 1-based.
///
/// Coordinates are signed and unchecked so that a request naming a square
/// off the board can still be represented and rejected by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({},{})", row, column)]
pub struct Square {
    /// Row, 1 (top) to 3 (bottom).
    pub row: i32,
    /// Column, 1 (left) to 3 (right).
    pub column: i32,
}

impl Square {
    /// Lowest valid row or column.
    pub const MIN: i32 = 1;
    /// Highest valid row or column.
    pub const MAX: i32 = 3;

    /// Creates a square without checking bounds.
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Checks if both coordinates lie in `[1, 3]`.
    pub fn in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.row)
            && (Self::MIN..=Self::MAX).contains(&self.column)
    }

    /// Row-major index (0-8) of this square, or `None` if off the board.
    pub fn index(&self) -> Option<usize> {
        if !self.in_range() {
            return None;
        }
        Some(((self.row - 1) * 3 + (self.column - 1)) as usize)
    }

    /// Square at a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 9 {
            return None;
        }
        Some(Self::new(index as i32 / 3 + 1, index as i32 % 3 + 1))
    }

    /// All nine squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..9).filter_map(Square::from_index)
    }
}

/// Current status of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// X completed a line.
    XWon,
    /// O completed a line.
    OWon,
    /// Board is full with no line.
    Draw,
}

impl GameStatus {
    /// Status for a game won by `player`.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => GameStatus::XWon,
            Player::O => GameStatus::OWon,
        }
    }

    /// Checks if no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::XWon => Some(Player::X),
            GameStatus::OWon => Some(Player::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}
