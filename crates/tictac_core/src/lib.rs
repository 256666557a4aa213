//! Tic-tac-toe match logic shared by the session server and its clients.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid and pure queries (`cell_at`, `is_full`, `winner`)
//! - **Rules**: win/draw detection and `derive_status`
//! - **Session**: the authoritative state machine with a single mutation,
//!   `apply_move`, validated by ordered contracts
//! - **Invariants**: properties every stored or decoded session satisfies
//! - **Wire**: the one JSON schema for snapshots, move requests, and errors
//!
//! # Example
//!
//! ```
//! use tictac_core::{GameSession, GameStatus, MatchId, Player, Rejection, Square};
//!
//! let session = GameSession::new(MatchId::from(1));
//! let session = session.apply_move(Player::X, Square::new(2, 2)).unwrap();
//! assert_eq!(session.current_turn(), Player::O);
//!
//! let again = session.apply_move(Player::O, Square::new(2, 2));
//! assert_eq!(again, Err(Rejection::SquareOccupied(Square::new(2, 2))));
//! assert_eq!(session.status(), GameStatus::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config_error;
mod contracts;
pub mod invariants;
pub mod rules;
mod session;
mod types;
pub mod wire;

pub use action::{Move, Rejection};
pub use board::{Board, OutOfRange};
pub use config_error::ConfigError;
pub use contracts::{LegalMove, MatchInProgress, PlayersTurn, SquareInRange, SquareIsEmpty};
pub use invariants::{InvariantViolation, check_session};
pub use rules::derive_status;
pub use session::{GameSession, MatchId};
pub use types::{CellValue, GameStatus, Player, Square};
pub use wire::{
    CellDto, ErrorBody, ErrorCode, MoveRequest, SessionSnapshot, SnapshotError, SquareDto,
    StatusQuery,
};
