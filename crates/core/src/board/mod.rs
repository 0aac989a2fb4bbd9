//! Board state, the starting layout and serializable snapshots

mod factory;
mod snapshot;
mod state;

pub use factory::BoardFactory;
pub use snapshot::{BoardSnapshot, PlacedPiece};
pub use state::{Board, MoveOutcome};
