//! Player commands: `start`, `move <from> <to>`, `status`, `end`

use std::str::FromStr;

use crate::error::CommandError;
use crate::position::Position;
use crate::storage::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Move { from: Position, to: Position },
    Status,
    End,
}

impl Command {
    /// Whether the session keeps reading commands after this one.
    pub fn is_playable(&self) -> bool {
        !matches!(self, Command::End)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (keyword, args) = tokens.split_first().ok_or(CommandError::Empty)?;

        match keyword.to_ascii_lowercase().as_str() {
            "start" => expect_arity("start", args, 0).map(|_| Command::Start),
            "status" => expect_arity("status", args, 0).map(|_| Command::Status),
            "end" => expect_arity("end", args, 0).map(|_| Command::End),
            "move" => {
                expect_arity("move", args, 2)?;
                Ok(Command::Move {
                    from: args[0].parse()?,
                    to: args[1].parse()?,
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn expect_arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::Arity {
            command,
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

/// Which game a session plays: a stored one or a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSelection {
    New,
    Existing(GameId),
}

impl FromStr for GameSelection {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("new") {
            return Ok(GameSelection::New);
        }
        s.parse()
            .map(GameSelection::Existing)
            .map_err(|_| CommandError::Unknown(s.to_string()))
    }
}
