//! Narrow seams between the game loop and the outside world: where commands
//! come from, where frames go, where levels live and how the player is asked
//! questions.

use std::path::{Path, PathBuf};

use crate::core::{GameError, Grid, KeyCommand, MoveRecord, Result};
use crate::models::GameRenderState;

pub trait InputSource {
    /// Non-blocking. `Ok(None)` means no command this tick.
    fn poll(&mut self) -> Result<Option<KeyCommand>>;
}

pub trait Renderer {
    fn render(&mut self, state: &GameRenderState<'_>) -> Result<()>;
}

pub trait LevelStore {
    fn load_level(&self, name: &str) -> Result<Vec<u8>>;
    fn save_level(&self, name: &str, grid: &Grid) -> Result<PathBuf>;
    fn save_history(&self, name: &str, moves: &[MoveRecord]) -> Result<PathBuf>;
    fn list_levels(&self) -> Result<Vec<String>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelChoice {
    Play(String),
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Question {
    SaveLevel,
    SaveHistory,
    PlayAgain,
}

impl Question {
    pub fn text(self) -> &'static str {
        match self {
            Question::SaveLevel => "Save the current board?",
            Question::SaveHistory => "Save your list of moves?",
            Question::PlayAgain => "Play again?",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveKind {
    Level,
    History,
}

#[derive(Debug)]
pub enum Notice<'a> {
    LoadFailed { level: &'a str, error: &'a GameError },
    Won { moves: usize, grid: &'a Grid },
    Abandoned,
    HistoryOverflow { capacity: usize },
    Saved { kind: SaveKind, path: &'a Path },
    SaveFailed { kind: SaveKind, error: &'a GameError },
    Goodbye,
}

pub trait Prompter {
    /// Asks for the next level, listing `available` ones.
    fn choose_level(&mut self, available: &[String]) -> Result<LevelChoice>;
    fn confirm(&mut self, question: Question) -> Result<bool>;
    /// Asks for a file name, without extension, to save under.
    fn ask_save_name(&mut self, kind: SaveKind) -> Result<String>;
    fn notify(&mut self, notice: Notice<'_>) -> Result<()>;
}

/// Everything the play loop needs from a user interface.
pub trait Frontend: InputSource + Renderer + Prompter {
    /// Called before the first frame of a level.
    fn begin_play(&mut self) -> Result<()>;
    /// Called once the level is over, before any further prompt.
    fn end_play(&mut self) -> Result<()>;
}
