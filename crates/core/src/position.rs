//! Board coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MoveError, PositionError};
use crate::movement::Movement;

pub const MIN_COORDINATE: i8 = 1;
pub const MAX_COORDINATE: i8 = 8;

/// A square on the board. `file` runs a..h as 1..8, `rank` runs 1..8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Position {
    file: i8,
    rank: i8,
}

impl Position {
    pub fn new(file: i8, rank: i8) -> Result<Self, PositionError> {
        if !Self::in_range(file) || !Self::in_range(rank) {
            return Err(PositionError::OutOfRange { file, rank });
        }
        Ok(Self { file, rank })
    }

    fn in_range(coordinate: i8) -> bool {
        (MIN_COORDINATE..=MAX_COORDINATE).contains(&coordinate)
    }

    pub fn file(&self) -> i8 {
        self.file
    }

    pub fn rank(&self) -> i8 {
        self.rank
    }

    /// Signed file distance from `other` to `self`.
    pub fn file_gap(&self, other: Position) -> i8 {
        self.file - other.file
    }

    /// Signed rank distance from `other` to `self`.
    pub fn rank_gap(&self, other: Position) -> i8 {
        self.rank - other.rank
    }

    /// Translates by one movement vector; fails if the result is off the board.
    pub fn move_by(&self, movement: Movement) -> Result<Position, MoveError> {
        let (file_delta, rank_delta) = movement.delta();
        Position::new(self.file + file_delta, self.rank + rank_delta).map_err(|_| MoveError::OffBoard)
    }

    /// Classifies the vector from `from` to `self` into a catalog movement.
    pub fn convert_movement(&self, from: Position) -> Result<Movement, MoveError> {
        let file_gap = self.file_gap(from);
        let rank_gap = self.rank_gap(from);
        Movement::from_gap(file_gap, rank_gap)
            .ok_or(MoveError::UnrecognizedMovement { file_gap, rank_gap })
    }

    /// Number of king steps between two squares.
    pub fn distance(&self, other: Position) -> i8 {
        self.file_gap(other).abs().max(self.rank_gap(other).abs())
    }

    /// Every square, rank 1 first.
    pub fn all() -> impl Iterator<Item = Position> {
        (MIN_COORDINATE..=MAX_COORDINATE)
            .flat_map(|rank| (MIN_COORDINATE..=MAX_COORDINATE).map(move |file| Position { file, rank }))
    }
}

impl TryFrom<(i8, i8)> for Position {
    type Error = PositionError;

    fn try_from((file, rank): (i8, i8)) -> Result<Self, Self::Error> {
        Position::new(file, rank)
    }
}

impl From<Position> for (i8, i8) {
    fn from(position: Position) -> Self {
        (position.file, position.rank)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PositionError::InvalidNotation(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        Position::new((file as u8 - b'a') as i8 + 1, (rank as u8 - b'0') as i8)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + (self.file - 1) as u8) as char;
        write!(f, "{}{}", file, self.rank)
    }
}
