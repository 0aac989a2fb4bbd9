//! Game lifecycle on top of storage

use tracing::{debug, info};

use crate::board::MoveOutcome;
use crate::error::{Error, Result};
use crate::game::{ChessGame, Score};
use crate::piece::Color;
use crate::position::Position;
use crate::storage::{Database, GameId, StoredGame};

pub struct ChessService {
    db: Database,
}

/// What `finish` did with a game.
#[derive(Debug, Clone, PartialEq)]
pub enum Finish {
    /// The game is undecided and stays stored.
    Undecided(Score),
    /// The game was decided; its records have been removed.
    Decided(Color),
}

impl ChessService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn game_ids(&self) -> Result<Vec<GameId>> {
        self.db.read_game_ids()
    }

    pub fn games(&self) -> Result<Vec<StoredGame>> {
        self.db.read_games()
    }

    /// Starts and stores a game from the standard layout.
    pub fn create_game(&self) -> Result<(GameId, ChessGame)> {
        let game = ChessGame::initial();
        let game_id = self.db.create_game(&game)?;
        Ok((game_id, game.with_id(game_id)))
    }

    pub fn load_game(&self, game_id: GameId) -> Result<ChessGame> {
        self.db.load_game(game_id)?.ok_or(Error::GameNotFound(game_id))
    }

    /// Applies a move in memory and, only if it is legal, writes the new state.
    pub fn play(&self, game: &mut ChessGame, from: Position, to: Position) -> Result<MoveOutcome> {
        let game_id = game.id().ok_or(Error::Unsaved)?;
        let outcome = game.move_piece(from, to)?;
        self.db.update_game(game_id, game)?;
        debug!(game_id, %from, %to, "move stored");
        Ok(outcome)
    }

    /// Ends a session. A decided game is torn down; an undecided one is kept
    /// so it can be resumed.
    pub fn finish(&self, game: &ChessGame) -> Result<Finish> {
        match game.winner() {
            Some(winner) => {
                let game_id = game.id().ok_or(Error::Unsaved)?;
                self.db.delete_game(game_id)?;
                info!(game_id, %winner, "decided game removed");
                Ok(Finish::Decided(winner))
            }
            None => Ok(Finish::Undecided(game.calculate_score())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoveError;

    fn service() -> ChessService {
        ChessService::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_play_persists_legal_moves_only() {
        let service = service();
        let (id, mut game) = service.create_game().unwrap();

        let err = service
            .play(&mut game, "a1".parse().unwrap(), "a5".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Move(MoveError::Obstructed(_))));
        assert_eq!(service.load_game(id).unwrap().turn(), Color::White);

        service
            .play(&mut game, "g1".parse().unwrap(), "f3".parse().unwrap())
            .unwrap();
        assert_eq!(service.load_game(id).unwrap(), game);
    }

    #[test]
    fn test_missing_game() {
        assert!(matches!(service().load_game(7), Err(Error::GameNotFound(7))));
    }

    #[test]
    fn test_finish_keeps_undecided_game() {
        let service = service();
        let (id, game) = service.create_game().unwrap();

        let finish = service.finish(&game).unwrap();
        assert!(matches!(finish, Finish::Undecided(_)));
        assert_eq!(service.game_ids().unwrap(), vec![id]);
    }

    #[test]
    fn test_loaded_game_carries_its_id() {
        let service = service();
        let (id, game) = service.create_game().unwrap();
        assert_eq!(game.id(), Some(id));
        assert_eq!(service.load_game(id).unwrap().id(), Some(id));
    }

    #[test]
    fn test_unsaved_game_is_not_played() {
        let service = service();
        let mut game = ChessGame::initial();

        let err = service
            .play(&mut game, "b2".parse().unwrap(), "b4".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Unsaved));
        assert_eq!(game, ChessGame::initial());
        assert!(service.game_ids().unwrap().is_empty());
    }
}
