//! Pieces and their movement rules

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::movement::{Movement, ALL_DIRECTIONS, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};
use crate::path::Path;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "WHITE" => Some(Color::White),
            "BLACK" => Some(Color::Black),
            _ => None,
        }
    }

    /// Direction in which this side's pawns advance.
    fn pawn_forward(self) -> Movement {
        match self {
            Color::White => Movement::Up,
            Color::Black => Movement::Down,
        }
    }

    fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const WHITE_PAWN: [Movement; 3] = [Movement::Up, Movement::UpRight, Movement::UpLeft];
const BLACK_PAWN: [Movement; 3] = [Movement::Down, Movement::DownRight, Movement::DownLeft];

/// Pawns on a file shared with another pawn of the same colour score this much.
pub const DOUBLED_PAWN_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    /// Movements this variant may make. Pawns depend on their colour.
    pub fn movements(self, color: Color) -> &'static [Movement] {
        match (self, color) {
            (PieceType::King | PieceType::Queen, _) => &ALL_DIRECTIONS,
            (PieceType::Rook, _) => &ORTHOGONAL,
            (PieceType::Bishop, _) => &DIAGONAL,
            (PieceType::Knight, _) => &KNIGHT_JUMPS,
            (PieceType::Pawn, Color::White) => &WHITE_PAWN,
            (PieceType::Pawn, Color::Black) => &BLACK_PAWN,
        }
    }

    /// Material value. Doubled pawns are discounted by the board, not here.
    pub fn score(self) -> f64 {
        match self {
            PieceType::King => 0.0,
            PieceType::Queen => 9.0,
            PieceType::Rook => 5.0,
            PieceType::Bishop => 3.0,
            PieceType::Knight => 2.5,
            PieceType::Pawn => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::King => "KING",
            PieceType::Queen => "QUEEN",
            PieceType::Rook => "ROOK",
            PieceType::Bishop => "BISHOP",
            PieceType::Knight => "KNIGHT",
            PieceType::Pawn => "PAWN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PieceType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PieceType::King => "King",
            PieceType::Queen => "Queen",
            PieceType::Rook => "Rook",
            PieceType::Bishop => "Bishop",
            PieceType::Knight => "Knight",
            PieceType::Pawn => "Pawn",
        }
    }

    fn letter(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    pub fn is_color(&self, color: Color) -> bool {
        self.color == color
    }

    /// Lowercase for WHITE, uppercase for BLACK.
    pub fn symbol(&self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_uppercase(),
        }
    }

    /// Computes the squares this piece passes over on the way from `from` to
    /// `to`. `destination` is whatever currently stands on `to`. Occupancy of
    /// the returned path is left to the caller.
    pub fn search_path(
        &self,
        from: Position,
        to: Position,
        destination: Option<&Piece>,
    ) -> Result<Path, MoveError> {
        if destination.is_some_and(|occupant| occupant.is_color(self.color)) {
            return Err(MoveError::OwnPieceCapture(to));
        }

        let movement = to.convert_movement(from)?;
        if !self.piece_type.movements(self.color).contains(&movement) {
            return Err(MoveError::MovementNotAllowed {
                piece: self.piece_type,
                movement,
            });
        }

        match self.piece_type {
            PieceType::King => {
                self.require(to.distance(from) == 1, from, to)?;
                Ok(Path::empty())
            }
            PieceType::Knight => {
                self.require(movement.is_knight_jump(), from, to)?;
                Ok(Path::empty())
            }
            PieceType::Queen | PieceType::Rook | PieceType::Bishop => Path::trace(from, to, movement),
            PieceType::Pawn => self.pawn_path(from, to, movement, destination),
        }
    }

    fn pawn_path(
        &self,
        from: Position,
        to: Position,
        movement: Movement,
        destination: Option<&Piece>,
    ) -> Result<Path, MoveError> {
        let distance = to.distance(from);

        if movement != self.color.pawn_forward() {
            self.require(distance == 1, from, to)?;
            if destination.is_none() {
                return Err(MoveError::PawnNeedsCapture(to));
            }
            return Ok(Path::empty());
        }

        if destination.is_some() {
            return Err(MoveError::PawnBlocked(to));
        }
        let from_start = from.rank() == self.color.pawn_start_rank();
        self.require(distance == 1 || (distance == 2 && from_start), from, to)?;
        Path::trace(from, to, movement)
    }

    fn require(&self, reachable: bool, from: Position, to: Position) -> Result<(), MoveError> {
        if reachable {
            Ok(())
        } else {
            Err(MoveError::CannotReach {
                piece: self.piece_type,
                from,
                to,
            })
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.piece_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(file: i8, rank: i8) -> Position {
        Position::new(file, rank).unwrap()
    }

    const WHITE_KING: Piece = Piece::new(Color::White, PieceType::King);
    const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    const WHITE_PAWN_PIECE: Piece = Piece::new(Color::White, PieceType::Pawn);
    const BLACK_PAWN_PIECE: Piece = Piece::new(Color::Black, PieceType::Pawn);

    #[test]
    fn test_opposite_is_involution() {
        for color in [Color::White, Color::Black] {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn test_knight_jump_has_empty_path() {
        let path = WHITE_KNIGHT.search_path(pos(2, 1), pos(3, 3), None).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_knight_rejects_irregular_jump() {
        let result = WHITE_KNIGHT.search_path(pos(2, 1), pos(4, 5), None);
        assert!(matches!(result, Err(MoveError::UnrecognizedMovement { .. })));
    }

    #[test]
    fn test_knight_cannot_move_like_bishop() {
        let result = WHITE_KNIGHT.search_path(pos(2, 1), pos(4, 3), None);
        assert_eq!(
            result,
            Err(MoveError::MovementNotAllowed {
                piece: PieceType::Knight,
                movement: Movement::UpRight,
            })
        );
    }

    #[test]
    fn test_king_single_step() {
        let path = WHITE_KING.search_path(pos(5, 1), pos(5, 2), None).unwrap();
        assert!(path.is_empty());

        let capture = Piece::new(Color::Black, PieceType::Queen);
        let path = WHITE_KING.search_path(pos(5, 1), pos(5, 2), Some(&capture)).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_king_cannot_slide() {
        let black_king = Piece::new(Color::Black, PieceType::King);
        let result = WHITE_KING.search_path(pos(6, 1), pos(8, 1), Some(&black_king));
        assert_eq!(
            result,
            Err(MoveError::CannotReach {
                piece: PieceType::King,
                from: pos(6, 1),
                to: pos(8, 1),
            })
        );
    }

    #[test]
    fn test_own_capture_rejected_before_geometry() {
        let own = Piece::new(Color::White, PieceType::Pawn);
        let queen = Piece::new(Color::White, PieceType::Queen);
        assert_eq!(
            queen.search_path(pos(1, 1), pos(2, 4), Some(&own)),
            Err(MoveError::OwnPieceCapture(pos(2, 4)))
        );
    }

    #[test]
    fn test_sliding_pieces_trace_paths() {
        let rook = Piece::new(Color::Black, PieceType::Rook);
        let path = rook.search_path(pos(8, 8), pos(8, 5), None).unwrap();
        assert_eq!(path.positions(), &[pos(8, 7), pos(8, 6)]);

        let bishop = Piece::new(Color::White, PieceType::Bishop);
        let path = bishop.search_path(pos(3, 1), pos(6, 4), None).unwrap();
        assert_eq!(path.positions(), &[pos(4, 2), pos(5, 3)]);

        assert!(matches!(
            rook.search_path(pos(8, 8), pos(7, 7), None),
            Err(MoveError::MovementNotAllowed { .. })
        ));
        assert!(matches!(
            bishop.search_path(pos(3, 1), pos(3, 4), None),
            Err(MoveError::MovementNotAllowed { .. })
        ));
    }

    #[test]
    fn test_pawn_advances() {
        let path = WHITE_PAWN_PIECE.search_path(pos(2, 2), pos(2, 4), None).unwrap();
        assert_eq!(path.positions(), &[pos(2, 3)]);

        let path = BLACK_PAWN_PIECE.search_path(pos(4, 7), pos(4, 6), None).unwrap();
        assert!(path.is_empty());

        assert!(matches!(
            WHITE_PAWN_PIECE.search_path(pos(2, 3), pos(2, 5), None),
            Err(MoveError::CannotReach { .. })
        ));
        assert!(matches!(
            WHITE_PAWN_PIECE.search_path(pos(2, 3), pos(2, 2), None),
            Err(MoveError::MovementNotAllowed { .. })
        ));
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        assert_eq!(
            WHITE_PAWN_PIECE.search_path(pos(2, 2), pos(2, 3), Some(&BLACK_PAWN_PIECE)),
            Err(MoveError::PawnBlocked(pos(2, 3)))
        );
        assert_eq!(
            WHITE_PAWN_PIECE.search_path(pos(2, 2), pos(3, 3), None),
            Err(MoveError::PawnNeedsCapture(pos(3, 3)))
        );
        assert!(WHITE_PAWN_PIECE
            .search_path(pos(2, 2), pos(3, 3), Some(&BLACK_PAWN_PIECE))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_storage_names_round_trip() {
        for piece_type in PieceType::ALL {
            assert_eq!(PieceType::parse(piece_type.as_str()), Some(piece_type));
        }
        assert_eq!(Color::parse("black"), Some(Color::Black));
        assert_eq!(Color::parse("green"), None);
    }
}
