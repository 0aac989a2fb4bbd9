//! Text rendering of a board

use crate::board::Board;
use crate::position::{Position, MAX_COORDINATE, MIN_COORDINATE};

pub const EMPTY_SQUARE: char = '.';

/// Eight rows from rank 8 down to rank 1, one character per file.
pub fn board_rows(board: &Board) -> Vec<String> {
    (MIN_COORDINATE..=MAX_COORDINATE)
        .rev()
        .map(|rank| {
            (MIN_COORDINATE..=MAX_COORDINATE)
                .map(|file| {
                    Position::new(file, rank)
                        .ok()
                        .and_then(|p| board.piece_at(p))
                        .map_or(EMPTY_SQUARE, |piece| piece.symbol())
                })
                .collect()
        })
        .collect()
}

/// The board with rank numbers and a file legend, for terminals.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (row, rank) in board_rows(board).iter().zip((MIN_COORDINATE..=MAX_COORDINATE).rev()) {
        out.push_str(&format!("{}  {}\n", row, rank));
    }
    out.push_str("\nabcdefgh\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardFactory;

    #[test]
    fn test_initial_rows() {
        let rows = board_rows(&BoardFactory::create_initial_board());
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "RNBQKBNR");
        assert_eq!(rows[1], "PPPPPPPP");
        assert_eq!(rows[4], "........");
        assert_eq!(rows[6], "pppppppp");
        assert_eq!(rows[7], "rnbqkbnr");
    }

    #[test]
    fn test_render_has_legend() {
        let text = render_board(&BoardFactory::create_initial_board());
        assert!(text.starts_with("RNBQKBNR  8\n"));
        assert!(text.ends_with("abcdefgh\n"));
    }
}
