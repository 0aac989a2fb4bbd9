//! SQLite storage for game state

mod db;
mod models;

pub use db::Database;
pub use models::*;
