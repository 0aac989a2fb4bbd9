//! Standard starting layout

use std::collections::BTreeMap;

use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

use super::Board;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

pub struct BoardFactory;

impl BoardFactory {
    /// 32 pieces, WHITE on ranks 1-2, BLACK on ranks 7-8, WHITE to move.
    pub fn create_initial_board() -> Board {
        let squares: BTreeMap<Position, Piece> = Position::all()
            .filter_map(|position| Some((position, Self::starting_piece(position)?)))
            .collect();

        Board::new(squares)
    }

    fn starting_piece(position: Position) -> Option<Piece> {
        let back_rank = BACK_RANK[(position.file() - 1) as usize];
        match position.rank() {
            1 => Some(Piece::new(Color::White, back_rank)),
            2 => Some(Piece::new(Color::White, PieceType::Pawn)),
            7 => Some(Piece::new(Color::Black, PieceType::Pawn)),
            8 => Some(Piece::new(Color::Black, back_rank)),
            _ => None,
        }
    }
}
