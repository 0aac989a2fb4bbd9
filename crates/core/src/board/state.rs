//! The board: sole owner of piece placement and the side to move

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::MoveError;
use crate::piece::{Color, Piece, PieceType, DOUBLED_PAWN_SCORE};
use crate::position::Position;

/// What an executed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: BTreeMap<Position, Piece>,
    turn: Color,
}

impl Board {
    /// A board with WHITE to move.
    pub fn new(squares: BTreeMap<Position, Piece>) -> Self {
        Self::with_turn(squares, Color::White)
    }

    pub fn with_turn(squares: BTreeMap<Position, Piece>, turn: Color) -> Self {
        Self { squares, turn }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Read-only view of the occupancy. Mutation goes through `move_piece`.
    pub fn pieces(&self) -> &BTreeMap<Position, Piece> {
        &self.squares
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.squares.get(&position)
    }

    /// Validates and executes a move, then hands the turn to the other side.
    /// On error nothing changes.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        let piece = self.validate_can_move(from, to).inspect_err(|e| {
            debug!(%from, %to, error = %e, "move rejected");
        })?;

        self.squares.remove(&from);
        let captured = self.squares.insert(to, piece);
        self.turn = self.turn.opposite();

        debug!(%from, %to, %piece, captured = ?captured, "move executed");
        Ok(MoveOutcome {
            from,
            to,
            piece,
            captured,
        })
    }

    fn validate_can_move(&self, from: Position, to: Position) -> Result<Piece, MoveError> {
        if from == to {
            return Err(MoveError::SamePosition);
        }

        let piece = *self.squares.get(&from).ok_or(MoveError::EmptyOrigin(from))?;
        if !piece.is_color(self.turn) {
            return Err(MoveError::WrongTurn { turn: self.turn });
        }

        let path = piece.search_path(from, to, self.squares.get(&to))?;
        path.validate_obstacle(&self.squares)?;

        Ok(piece)
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.squares
            .values()
            .any(|p| p.is_color(color) && p.piece_type == PieceType::King)
    }

    /// Material of one side. Pawns sharing a file with a same-coloured pawn
    /// count `DOUBLED_PAWN_SCORE` each.
    pub fn score(&self, color: Color) -> f64 {
        let mut pawns_per_file: HashMap<i8, u32> = HashMap::new();
        let mut total = 0.0;

        for (position, piece) in self.squares.iter().filter(|(_, p)| p.is_color(color)) {
            if piece.piece_type == PieceType::Pawn {
                *pawns_per_file.entry(position.file()).or_insert(0) += 1;
            } else {
                total += piece.piece_type.score();
            }
        }

        for count in pawns_per_file.into_values() {
            let each = if count > 1 { DOUBLED_PAWN_SCORE } else { PieceType::Pawn.score() };
            total += each * count as f64;
        }

        total
    }
}
