//! Error types raised while loading and playing a level.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a level source could not be turned into a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelDefect {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("level has {count} players, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Errors surfaced by the game engine and its collaborators.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed level: {0}")]
    MalformedLevel(#[from] LevelDefect),

    #[error("no player found in level")]
    PlayerNotFound,

    #[error("too many moves: history is limited to {capacity}")]
    HistoryOverflow { capacity: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GameError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
