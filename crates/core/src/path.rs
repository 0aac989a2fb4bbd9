//! Squares strictly between the origin and destination of a move

use std::collections::BTreeMap;

use crate::error::MoveError;
use crate::movement::Movement;
use crate::piece::Piece;
use crate::position::{Position, MAX_COORDINATE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    positions: Vec<Position>,
}

impl Path {
    /// Path of a jump or a single step.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walks from `from` along `movement` and collects every square before
    /// `to`. `to` must lie on the ray, which `Position::convert_movement`
    /// guarantees for line movements.
    pub fn trace(from: Position, to: Position, movement: Movement) -> Result<Self, MoveError> {
        let mut positions = Vec::new();
        let mut next = from;

        // a ray on an 8x8 board never needs more than 7 steps
        for _ in 0..MAX_COORDINATE {
            next = next.move_by(movement)?;
            if next == to {
                return Ok(Self { positions });
            }
            positions.push(next);
        }

        Err(MoveError::OffBoard)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fails on the first occupied square along the path.
    pub fn validate_obstacle(&self, occupied: &BTreeMap<Position, Piece>) -> Result<(), MoveError> {
        match self.positions.iter().find(|p| occupied.contains_key(*p)) {
            Some(blocked) => Err(MoveError::Obstructed(*blocked)),
            None => Ok(()),
        }
    }
}
