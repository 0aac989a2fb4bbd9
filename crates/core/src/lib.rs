//! Chess Rules Core Library
//!
//! Move legality for two-player chess: piece geometry, path obstruction and
//! turn order, plus storage of games in progress.

pub mod board;
pub mod command;
pub mod error;
pub mod game;
pub mod movement;
pub mod path;
pub mod piece;
pub mod position;
pub mod render;
pub mod service;
pub mod storage;

pub use board::{Board, BoardFactory, BoardSnapshot, MoveOutcome, PlacedPiece};
pub use command::{Command, GameSelection};
pub use error::{CommandError, Error, MoveError, PositionError, Result};
pub use game::{ChessGame, Score};
pub use movement::Movement;
pub use path::Path;
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use service::{ChessService, Finish};
pub use storage::{Database, GameId};
