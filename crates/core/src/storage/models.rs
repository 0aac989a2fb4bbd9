//! Database models

use serde::{Deserialize, Serialize};

use crate::board::PlacedPiece;
use crate::error::{Error, Result};
use crate::piece::{Color, PieceType};
use crate::position::Position;

pub type GameId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub game_id: GameId,
    pub turn: String,
    pub created_at: u64,
}

impl StoredGame {
    pub fn turn(&self) -> Result<Color> {
        Color::parse(&self.turn)
            .ok_or_else(|| Error::CorruptRecord(format!("unknown turn '{}'", self.turn)))
    }
}

/// One occupied square of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPiece {
    pub game_id: GameId,
    pub file: i8,
    pub rank: i8,
    pub piece_type: String,
    pub color: String,
}

impl StoredPiece {
    pub fn from_placed(game_id: GameId, placed: &PlacedPiece) -> Self {
        Self {
            game_id,
            file: placed.file,
            rank: placed.rank,
            piece_type: placed.piece_type.as_str().to_string(),
            color: placed.color.as_str().to_string(),
        }
    }

    pub fn to_placed(&self) -> Result<PlacedPiece> {
        let piece_type = PieceType::parse(&self.piece_type)
            .ok_or_else(|| Error::CorruptRecord(format!("unknown piece type '{}'", self.piece_type)))?;
        let color = Color::parse(&self.color)
            .ok_or_else(|| Error::CorruptRecord(format!("unknown color '{}'", self.color)))?;

        Position::new(self.file, self.rank)
            .map_err(|e| Error::CorruptRecord(format!("stored piece: {}", e)))?;

        Ok(PlacedPiece {
            file: self.file,
            rank: self.rank,
            piece_type,
            color,
        })
    }
}
