//! Movement catalog
//!
//! Sliding directions are unit vectors; the path tracer repeats them.
//! Knight jumps are matched as-is and never repeated.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Up,
    Down,
    Right,
    Left,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,

    UpUpRight,
    UpUpLeft,
    RightRightUp,
    RightRightDown,
    DownDownRight,
    DownDownLeft,
    LeftLeftUp,
    LeftLeftDown,
}

pub const ORTHOGONAL: [Movement; 4] = [Movement::Up, Movement::Down, Movement::Right, Movement::Left];

pub const DIAGONAL: [Movement; 4] = [
    Movement::UpRight,
    Movement::UpLeft,
    Movement::DownRight,
    Movement::DownLeft,
];

pub const ALL_DIRECTIONS: [Movement; 8] = [
    Movement::Up,
    Movement::Down,
    Movement::Right,
    Movement::Left,
    Movement::UpRight,
    Movement::UpLeft,
    Movement::DownRight,
    Movement::DownLeft,
];

pub const KNIGHT_JUMPS: [Movement; 8] = [
    Movement::UpUpRight,
    Movement::UpUpLeft,
    Movement::RightRightUp,
    Movement::RightRightDown,
    Movement::DownDownRight,
    Movement::DownDownLeft,
    Movement::LeftLeftUp,
    Movement::LeftLeftDown,
];

impl Movement {
    /// (file delta, rank delta)
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Movement::Up => (0, 1),
            Movement::Down => (0, -1),
            Movement::Right => (1, 0),
            Movement::Left => (-1, 0),
            Movement::UpRight => (1, 1),
            Movement::UpLeft => (-1, 1),
            Movement::DownRight => (1, -1),
            Movement::DownLeft => (-1, -1),
            Movement::UpUpRight => (1, 2),
            Movement::UpUpLeft => (-1, 2),
            Movement::RightRightUp => (2, 1),
            Movement::RightRightDown => (2, -1),
            Movement::DownDownRight => (1, -2),
            Movement::DownDownLeft => (-1, -2),
            Movement::LeftLeftUp => (-2, 1),
            Movement::LeftLeftDown => (-2, -1),
        }
    }

    pub fn is_knight_jump(self) -> bool {
        KNIGHT_JUMPS.contains(&self)
    }

    /// Classifies a raw displacement. Straight and diagonal lines of any
    /// length normalize to their unit direction; anything else must be an
    /// exact knight jump. The zero vector is not a movement.
    pub fn from_gap(file_gap: i8, rank_gap: i8) -> Option<Movement> {
        if file_gap == 0 && rank_gap == 0 {
            return None;
        }

        let is_line = file_gap == 0 || rank_gap == 0 || file_gap.abs() == rank_gap.abs();
        if is_line {
            let unit = (file_gap.signum(), rank_gap.signum());
            return ALL_DIRECTIONS.iter().copied().find(|m| m.delta() == unit);
        }

        KNIGHT_JUMPS
            .iter()
            .copied()
            .find(|m| m.delta() == (file_gap, rank_gap))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::Up => "up",
            Movement::Down => "down",
            Movement::Right => "right",
            Movement::Left => "left",
            Movement::UpRight => "up-right",
            Movement::UpLeft => "up-left",
            Movement::DownRight => "down-right",
            Movement::DownLeft => "down-left",
            Movement::UpUpRight => "up-up-right",
            Movement::UpUpLeft => "up-up-left",
            Movement::RightRightUp => "right-right-up",
            Movement::RightRightDown => "right-right-down",
            Movement::DownDownRight => "down-down-right",
            Movement::DownDownLeft => "down-down-left",
            Movement::LeftLeftUp => "left-left-up",
            Movement::LeftLeftDown => "left-left-down",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
