//! Database operations

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use super::models::*;
use crate::board::{Board, BoardSnapshot};
use crate::error::Result;
use crate::game::ChessGame;
use crate::piece::Color;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS chess_status (
                game_id INTEGER PRIMARY KEY AUTOINCREMENT,
                turn TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pieces (
                game_id INTEGER NOT NULL,
                file INTEGER NOT NULL,
                rank INTEGER NOT NULL,
                piece_type TEXT NOT NULL,
                color TEXT NOT NULL,
                PRIMARY KEY (game_id, file, rank),
                FOREIGN KEY (game_id) REFERENCES chess_status(game_id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_pieces_game_id ON pieces(game_id);
            "#,
        )?;
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }

    pub fn read_game_ids(&self) -> Result<Vec<GameId>> {
        let mut stmt = self.conn.prepare("SELECT game_id FROM chess_status ORDER BY game_id")?;

        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ids)
    }

    pub fn read_games(&self) -> Result<Vec<StoredGame>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, turn, created_at FROM chess_status ORDER BY game_id DESC"
        )?;

        let games = stmt.query_map([], |row| {
            Ok(StoredGame {
                game_id: row.get(0)?,
                turn: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(games)
    }

    pub fn read_turn(&self, game_id: GameId) -> Result<Option<Color>> {
        let stored = self.conn.query_row(
            "SELECT game_id, turn, created_at FROM chess_status WHERE game_id = ?1",
            params![game_id],
            |row| {
                Ok(StoredGame {
                    game_id: row.get(0)?,
                    turn: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        ).optional()?;

        stored.map(|game| game.turn()).transpose()
    }

    pub fn read_pieces(&self, game_id: GameId) -> Result<Vec<StoredPiece>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, file, rank, piece_type, color FROM pieces WHERE game_id = ?1"
        )?;

        let pieces = stmt.query_map(params![game_id], |row| {
            Ok(StoredPiece {
                game_id: row.get(0)?,
                file: row.get(1)?,
                rank: row.get(2)?,
                piece_type: row.get(3)?,
                color: row.get(4)?,
            })
        })?.collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(pieces)
    }

    /// Rebuilds a stored game, `None` if the id is unknown.
    pub fn load_game(&self, game_id: GameId) -> Result<Option<ChessGame>> {
        let Some(turn) = self.read_turn(game_id)? else {
            return Ok(None);
        };

        let pieces = self
            .read_pieces(game_id)?
            .iter()
            .map(StoredPiece::to_placed)
            .collect::<Result<Vec<_>>>()?;

        let board = Board::from_snapshot(&BoardSnapshot { turn, pieces })?;
        Ok(Some(ChessGame::new(board).with_id(game_id)))
    }

    /// Stores a new game with its full layout and returns the fresh id.
    pub fn create_game(&self, game: &ChessGame) -> Result<GameId> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO chess_status (turn, created_at) VALUES (?1, ?2)",
            params![game.turn().as_str(), Self::now()],
        )?;
        let game_id = tx.last_insert_rowid();
        Self::insert_pieces(&tx, game_id, game)?;

        tx.commit()?;
        info!(game_id, "game created");
        Ok(game_id)
    }

    /// Replaces turn and layout of a stored game in one transaction.
    pub fn update_game(&self, game_id: GameId, game: &ChessGame) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "UPDATE chess_status SET turn = ?1 WHERE game_id = ?2",
            params![game.turn().as_str(), game_id],
        )?;
        tx.execute("DELETE FROM pieces WHERE game_id = ?1", params![game_id])?;
        Self::insert_pieces(&tx, game_id, game)?;

        tx.commit()?;
        Ok(())
    }

    fn insert_pieces(conn: &Connection, game_id: GameId, game: &ChessGame) -> Result<()> {
        let mut stmt = conn.prepare(
            r#"
            INSERT INTO pieces (game_id, file, rank, piece_type, color)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;

        for placed in &game.board().snapshot().pieces {
            let row = StoredPiece::from_placed(game_id, placed);
            stmt.execute(params![row.game_id, row.file, row.rank, row.piece_type, row.color])?;
        }
        Ok(())
    }

    pub fn delete_game(&self, game_id: GameId) -> Result<()> {
        self.conn.execute("DELETE FROM chess_status WHERE game_id = ?1", params![game_id])?;
        info!(game_id, "game deleted");
        Ok(())
    }

    pub fn delete_all(&self) -> Result<()> {
        self.conn.execute_batch("DELETE FROM pieces; DELETE FROM chess_status;")?;
        info!("all games deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_create_and_load_initial_game() {
        let db = Database::open_in_memory().unwrap();
        let game = ChessGame::initial();

        let id = db.create_game(&game).unwrap();
        assert_eq!(db.read_game_ids().unwrap(), vec![id]);
        assert_eq!(db.read_turn(id).unwrap(), Some(Color::White));
        assert_eq!(db.read_pieces(id).unwrap().len(), 32);
        assert_eq!(db.load_game(id).unwrap(), Some(game.with_id(id)));
    }

    #[test]
    fn test_update_replaces_layout() {
        let db = Database::open_in_memory().unwrap();
        let mut game = ChessGame::initial();
        let id = db.create_game(&game).unwrap();

        game.move_piece("b2".parse().unwrap(), "b4".parse().unwrap()).unwrap();
        db.update_game(id, &game).unwrap();

        let loaded = db.load_game(id).unwrap().unwrap();
        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.board(), game.board());
        assert_eq!(loaded.turn(), Color::Black);
        assert_eq!(db.read_pieces(id).unwrap().len(), 32);
    }

    #[test]
    fn test_unknown_game() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.read_turn(42).unwrap(), None);
        assert!(db.load_game(42).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_game(&ChessGame::initial()).unwrap();
        let second = db.create_game(&ChessGame::initial()).unwrap();

        db.delete_game(first).unwrap();
        assert!(db.read_pieces(first).unwrap().is_empty());
        assert_eq!(db.read_game_ids().unwrap(), vec![second]);

        db.delete_all().unwrap();
        assert!(db.read_game_ids().unwrap().is_empty());
        assert!(db.read_pieces(second).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_game(&ChessGame::initial()).unwrap();
        db.conn
            .execute("UPDATE pieces SET piece_type = 'DRAGON' WHERE game_id = ?1", params![id])
            .unwrap();

        let err = db.load_game(id).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_off_board_row_is_reported() {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_game(&ChessGame::initial()).unwrap();
        db.conn
            .execute(
                "UPDATE pieces SET file = 9 WHERE game_id = ?1 AND file = 1 AND rank = 1",
                params![id],
            )
            .unwrap();

        let err = db.load_game(id).unwrap_err();
        assert!(matches!(err, Error::CorruptRecord(_)));
        assert!(err.is_persistence());
    }
}
