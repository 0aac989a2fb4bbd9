//! Serializable board state, shaped like the persisted rows

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

use super::Board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub file: i8,
    pub rank: i8,
    pub piece_type: PieceType,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub turn: Color,
    pub pieces: Vec<PlacedPiece>,
}

impl BoardSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        let pieces = self
            .pieces()
            .iter()
            .map(|(position, piece)| PlacedPiece {
                file: position.file(),
                rank: position.rank(),
                piece_type: piece.piece_type,
                color: piece.color,
            })
            .collect();

        BoardSnapshot {
            turn: self.turn(),
            pieces,
        }
    }

    /// Rebuilds a board, rejecting off-board squares and doubly occupied ones.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Board> {
        let mut squares = BTreeMap::new();

        for placed in &snapshot.pieces {
            let position = Position::new(placed.file, placed.rank)?;
            let piece = Piece::new(placed.color, placed.piece_type);
            if squares.insert(position, piece).is_some() {
                return Err(Error::CorruptRecord(format!("two pieces on {}", position)));
            }
        }

        Ok(Board::with_turn(squares, snapshot.turn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardFactory;

    #[test]
    fn test_snapshot_round_trip_after_moves() {
        let mut board = BoardFactory::create_initial_board();
        board.move_piece("b2".parse().unwrap(), "b4".parse().unwrap()).unwrap();
        board.move_piece("g8".parse().unwrap(), "f6".parse().unwrap()).unwrap();

        let json = board.snapshot().to_json().unwrap();
        let restored = Board::from_snapshot(&BoardSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_rejects_duplicate_square() {
        let placed = PlacedPiece {
            file: 1,
            rank: 1,
            piece_type: PieceType::Rook,
            color: Color::White,
        };
        let snapshot = BoardSnapshot {
            turn: Color::White,
            pieces: vec![placed.clone(), placed],
        };
        assert!(matches!(Board::from_snapshot(&snapshot), Err(Error::CorruptRecord(_))));
    }

    #[test]
    fn test_rejects_off_board_piece() {
        let snapshot = BoardSnapshot {
            turn: Color::Black,
            pieces: vec![PlacedPiece {
                file: 9,
                rank: 1,
                piece_type: PieceType::King,
                color: Color::Black,
            }],
        };
        assert!(matches!(Board::from_snapshot(&snapshot), Err(Error::Position(_))));
    }
}
