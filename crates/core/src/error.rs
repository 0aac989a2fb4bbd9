//! Error types for chess-rules-core

use thiserror::Error;

use crate::movement::Movement;
use crate::piece::{Color, PieceType};
use crate::position::Position;
use crate::storage::GameId;

/// A coordinate that cannot exist on an 8x8 board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position ({file}, {rank}) is outside the board")]
    OutOfRange { file: i8, rank: i8 },

    #[error("'{0}' is not a square, use a1 to h8")]
    InvalidNotation(String),
}

/// Why a requested move was rejected. The board is untouched whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("a piece must move to a different square")]
    SamePosition,

    #[error("there is no piece at {0}")]
    EmptyOrigin(Position),

    #[error("it is {turn}'s turn")]
    WrongTurn { turn: Color },

    #[error("cannot capture your own piece at {0}")]
    OwnPieceCapture(Position),

    #[error("({file_gap}, {rank_gap}) is not a recognized movement")]
    UnrecognizedMovement { file_gap: i8, rank_gap: i8 },

    #[error("{piece} cannot move {movement}")]
    MovementNotAllowed { piece: PieceType, movement: Movement },

    #[error("{piece} cannot reach {to} from {from}")]
    CannotReach {
        piece: PieceType,
        from: Position,
        to: Position,
    },

    #[error("the path is blocked at {0}")]
    Obstructed(Position),

    #[error("a pawn cannot advance onto the occupied square {0}")]
    PawnBlocked(Position),

    #[error("a pawn moves diagonally only to capture, {0} is empty")]
    PawnNeedsCapture(Position),

    #[error("movement leaves the board")]
    OffBoard,

    #[error("the game is already over")]
    GameOver,
}

/// Malformed console or form input, rejected before it reaches the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("no command given")]
    Empty,

    #[error("unknown command '{0}', use start, move, status or end")]
    Unknown(String),

    #[error("'{command}' takes {expected} argument(s), got {actual}")]
    Arity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Position(#[from] PositionError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt stored record: {0}")]
    CorruptRecord(String),

    #[error("No game with id {0}")]
    GameNotFound(GameId),

    #[error("Game has not been stored yet")]
    Unsaved,
}

impl Error {
    /// Storage failures end a console session; everything else is recoverable.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Database(_) | Error::CorruptRecord(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
