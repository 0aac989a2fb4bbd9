//! A game: a board plus end-of-game rules
//!
//! The game ends when a king is captured. Scores count material with
//! doubled pawns discounted.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, BoardFactory, MoveOutcome};
use crate::error::MoveError;
use crate::piece::Color;
use crate::position::Position;
use crate::storage::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub white: f64,
    pub black: f64,
}

impl Score {
    pub fn of(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// The side ahead on material, `None` on a tie.
    pub fn leader(&self) -> Option<Color> {
        if self.white > self.black {
            Some(Color::White)
        } else if self.black > self.white {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// How far `color` is ahead; negative when behind.
    pub fn margin(&self, color: Color) -> f64 {
        self.of(color) - self.of(color.opposite())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHITE: {:.1} / BLACK: {:.1}", self.white, self.black)
    }
}

/// A board plus the storage id it was saved under, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ChessGame {
    id: Option<GameId>,
    board: Board,
}

impl ChessGame {
    pub fn new(board: Board) -> Self {
        Self { id: None, board }
    }

    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<GameId> {
        self.id
    }

    /// A fresh game from the standard layout.
    pub fn initial() -> Self {
        Self::new(BoardFactory::create_initial_board())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        if self.is_end() {
            return Err(MoveError::GameOver);
        }

        let outcome = self.board.move_piece(from, to)?;
        if let Some(winner) = self.winner() {
            info!(%winner, "king captured, game over");
        }
        Ok(outcome)
    }

    pub fn is_end(&self) -> bool {
        !self.board.has_king(Color::White) || !self.board.has_king(Color::Black)
    }

    /// The side whose king is still standing, once the game is over.
    pub fn winner(&self) -> Option<Color> {
        match (self.board.has_king(Color::White), self.board.has_king(Color::Black)) {
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            _ => None,
        }
    }

    pub fn calculate_score(&self) -> Score {
        Score {
            white: self.board.score(Color::White),
            black: self.board.score(Color::Black),
        }
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceType};
    use std::collections::BTreeMap;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn kings_and_rook() -> ChessGame {
        let mut squares = BTreeMap::new();
        squares.insert(pos("e1"), Piece::new(Color::White, PieceType::King));
        squares.insert(pos("e2"), Piece::new(Color::White, PieceType::Rook));
        squares.insert(pos("e8"), Piece::new(Color::Black, PieceType::King));
        squares.insert(pos("a7"), Piece::new(Color::Black, PieceType::Pawn));
        ChessGame::new(Board::new(squares))
    }

    #[test]
    fn test_id_travels_with_game() {
        let game = ChessGame::initial();
        assert_eq!(game.id(), None);

        let mut stored = game.clone().with_id(3);
        assert_eq!(stored.id(), Some(3));
        assert_ne!(stored, game);

        stored.move_piece(pos("b2"), pos("b4")).unwrap();
        assert_eq!(stored.id(), Some(3));
    }

    #[test]
    fn test_fresh_game_is_not_over() {
        let game = ChessGame::initial();
        assert!(!game.is_end());
        assert_eq!(game.winner(), None);
        assert_eq!(game.calculate_score().leader(), None);
    }

    #[test]
    fn test_king_capture_ends_game() {
        let mut game = kings_and_rook();
        game.move_piece(pos("e2"), pos("e7")).unwrap();
        game.move_piece(pos("a7"), pos("a6")).unwrap();
        let outcome = game.move_piece(pos("e7"), pos("e8")).unwrap();

        assert_eq!(outcome.captured, Some(Piece::new(Color::Black, PieceType::King)));
        assert!(game.is_end());
        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn test_no_moves_after_end() {
        let mut game = kings_and_rook();
        game.move_piece(pos("e2"), pos("e7")).unwrap();
        game.move_piece(pos("a7"), pos("a6")).unwrap();
        game.move_piece(pos("e7"), pos("e8")).unwrap();

        let before = game.clone();
        assert_eq!(game.move_piece(pos("a6"), pos("a5")), Err(MoveError::GameOver));
        assert_eq!(game, before);
        assert!(game.is_end());
    }

    #[test]
    fn test_score_and_leader() {
        let game = kings_and_rook();
        let score = game.calculate_score();
        assert_eq!(score.of(Color::White), 5.0);
        assert_eq!(score.of(Color::Black), 1.0);
        assert_eq!(score.leader(), Some(Color::White));
        assert_eq!(score.margin(Color::White), 4.0);
        assert_eq!(score.margin(Color::Black), -4.0);
        assert_eq!(score.to_string(), "WHITE: 5.0 / BLACK: 1.0");
    }
}
