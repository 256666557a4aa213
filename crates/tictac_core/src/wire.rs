//! JSON shapes exchanged between server and client.
//!
//! There is exactly one session schema. The server serializes a
//! [`GameSession`] through [`SessionSnapshot`]; the client decodes the same
//! snapshot back into a [`GameSession`], validating the board layout and
//! the session invariants on the way in.

use crate::board::Board;
use crate::invariants::{InvariantViolation, check_session};
use crate::session::{GameSession, MatchId};
use crate::types::{CellValue, GameStatus, Player, Square};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One `{row, column, value}` triple of a serialized board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDto {
    /// Row, 1-based.
    pub row: i32,
    /// Column, 1-based.
    pub column: i32,
    /// Cell contents.
    pub value: CellValue,
}

/// Serialized session: `{id, board, currentTurn, status, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Match id.
    pub id: MatchId,
    /// All nine cells in row-major order.
    pub board: Vec<CellDto>,
    /// Player to move.
    pub current_turn: Player,
    /// Match status.
    pub status: GameStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<GameSession> for SessionSnapshot {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id(),
            board: session
                .board()
                .cells()
                .map(|(square, value)| CellDto {
                    row: square.row,
                    column: square.column,
                    value,
                })
                .collect(),
            current_turn: session.current_turn(),
            status: session.status(),
            created_at: session.created_at(),
        }
    }
}

/// A snapshot that does not describe a valid session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    /// The board did not list exactly nine cells.
    #[display("Board lists {} cells, expected 9", _0)]
    WrongCellCount(#[error(not(source))] usize),

    /// A cell named a position off the board.
    #[display("Board cell {} is outside the 3x3 board", _0)]
    CellOutOfRange(#[error(not(source))] Square),

    /// Two cells named the same position.
    #[display("Board cell {} is listed twice", _0)]
    DuplicateCell(#[error(not(source))] Square),

    /// The decoded session breaks an invariant.
    #[display("{}", _0)]
    Invariant(InvariantViolation),
}

impl TryFrom<SessionSnapshot> for GameSession {
    type Error = SnapshotError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        if snapshot.board.len() != 9 {
            return Err(SnapshotError::WrongCellCount(snapshot.board.len()));
        }

        let mut board = Board::new();
        let mut seen = [false; 9];
        for cell in &snapshot.board {
            let square = Square::new(cell.row, cell.column);
            let idx = square
                .index()
                .ok_or(SnapshotError::CellOutOfRange(square))?;
            if seen[idx] {
                return Err(SnapshotError::DuplicateCell(square));
            }
            seen[idx] = true;
            board
                .set(square, cell.value)
                .map_err(|e| SnapshotError::CellOutOfRange(e.square))?;
        }

        let session = GameSession::from_parts(
            snapshot.id,
            board,
            snapshot.current_turn,
            snapshot.status,
            snapshot.created_at,
        );
        check_session(&session).map_err(SnapshotError::Invariant)?;
        Ok(session)
    }
}

/// Target square of a move request, `x` = row and `y` = column.
///
/// Coordinates are read as `i64` so that any integer a client sends reaches
/// the rules and is refused as an invalid square, not as a malformed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareDto {
    /// Row, 1-based.
    pub x: i64,
    /// Column, 1-based.
    pub y: i64,
}

/// Saturates to the `i32` range; anything clamped is already off the board.
fn narrow(coordinate: i64) -> i32 {
    i32::try_from(coordinate).unwrap_or(if coordinate < 0 { i32::MIN } else { i32::MAX })
}

impl From<SquareDto> for Square {
    fn from(dto: SquareDto) -> Self {
        Square::new(narrow(dto.x), narrow(dto.y))
    }
}

impl From<Square> for SquareDto {
    fn from(square: Square) -> Self {
        Self {
            x: i64::from(square.row),
            y: i64::from(square.column),
        }
    }
}

/// Body of `POST /games/move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Match to move in.
    pub match_id: MatchId,
    /// Symbol of the mover.
    pub player_id: Player,
    /// Target square.
    pub square: SquareDto,
}

/// Query string of `GET /games/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    /// Match to read.
    pub match_id: MatchId,
}

/// Machine-readable reason carried by every error response.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The match already ended.
    GameAlreadyFinished,
    /// Wrong player.
    NotYourTurn,
    /// Square off the board.
    InvalidSquare,
    /// Square taken.
    SquareOccupied,
    /// Unknown match id.
    GameNotFound,
    /// Malformed request.
    BadRequest,
    /// The store refused to allocate or serve a session.
    StoreUnavailable,
    /// A stored session failed its invariant checks.
    SessionCorrupted,
}

/// Error envelope: `{timestamp, status, error, message, path, code}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub error: String,
    /// User-facing explanation.
    pub message: String,
    /// Request path.
    pub path: String,
    /// Machine-readable reason.
    pub code: ErrorCode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_shape() {
        let session = GameSession::new(MatchId::from(42))
            .apply_move(Player::X, Square::new(1, 2))
            .unwrap();
        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["id"], json!(42));
        assert_eq!(value["currentTurn"], json!("O"));
        assert_eq!(value["status"], json!("IN_PROGRESS"));
        assert!(value["createdAt"].is_string());
        let board = value["board"].as_array().unwrap();
        assert_eq!(board.len(), 9);
        assert_eq!(board[0], json!({"row": 1, "column": 1, "value": "EMPTY"}));
        assert_eq!(board[1], json!({"row": 1, "column": 2, "value": "X"}));
    }

    #[test]
    fn test_decode_accepts_any_cell_order() {
        let session = GameSession::new(MatchId::from(3))
            .apply_move(Player::X, Square::new(3, 1))
            .unwrap();
        let mut snapshot = SessionSnapshot::from(session.clone());
        snapshot.board.reverse();
        assert_eq!(GameSession::try_from(snapshot), Ok(session));
    }

    #[test]
    fn test_decode_rejects_duplicate_cells() {
        let mut snapshot = SessionSnapshot::from(GameSession::new(MatchId::from(3)));
        snapshot.board[8] = snapshot.board[0];
        assert_eq!(
            GameSession::try_from(snapshot),
            Err(SnapshotError::DuplicateCell(Square::new(1, 1)))
        );
    }

    #[test]
    fn test_decode_rejects_short_board() {
        let mut snapshot = SessionSnapshot::from(GameSession::new(MatchId::from(3)));
        snapshot.board.pop();
        assert_eq!(
            GameSession::try_from(snapshot),
            Err(SnapshotError::WrongCellCount(8))
        );
    }

    #[test]
    fn test_decode_rejects_inconsistent_status() {
        let mut snapshot = SessionSnapshot::from(GameSession::new(MatchId::from(3)));
        snapshot.status = GameStatus::Draw;
        assert!(matches!(
            GameSession::try_from(snapshot),
            Err(SnapshotError::Invariant(_))
        ));
    }

    #[test]
    fn test_move_request_shape() {
        let body = json!({"matchId": 7, "playerId": "O", "square": {"x": 2, "y": 3}});
        let req: MoveRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.match_id, MatchId::from(7));
        assert_eq!(req.player_id, Player::O);
        assert_eq!(Square::from(req.square), Square::new(2, 3));
    }

    #[test]
    fn test_huge_coordinates_stay_off_the_board() {
        let body = json!({"matchId": 1, "playerId": "X", "square": {"x": 4294967296_i64, "y": 1}});
        let req: MoveRequest = serde_json::from_value(body).unwrap();
        let square = Square::from(req.square);
        assert_eq!(square, Square::new(i32::MAX, 1));
        assert!(!square.in_range());

        let low = Square::from(SquareDto { x: 2, y: i64::MIN });
        assert_eq!(low, Square::new(2, i32::MIN));
    }
}
