//! Game configuration: key bindings and session limits.
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables:
//! - `SOKOTERM_HISTORY_CAPACITY` - maximum number of recorded moves
//! - `SOKOTERM_ZOOM` - initial zoom level (clamped to 1..=3)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{DEFAULT_HISTORY_CAPACITY, Direction, KeyCommand};
use crate::session::{MAX_ZOOM, MIN_ZOOM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("key {key:?} is bound to both {first:?} and {second:?}")]
    DuplicateBinding {
        key: char,
        first: KeyCommand,
        second: KeyCommand,
    },

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub keys: KeyBindings,
    pub history_capacity: usize,
    pub initial_zoom: u8,
    pub poll_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            keys: KeyBindings::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            initial_zoom: MIN_ZOOM,
            poll_interval_ms: 50,
        }
    }
}

impl GameConfig {
    /// Reads `path` when given, applies environment overrides and validates
    /// the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SOKOTERM_HISTORY_CAPACITY") {
            self.history_capacity = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SOKOTERM_HISTORY_CAPACITY",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("SOKOTERM_ZOOM") {
            self.initial_zoom = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SOKOTERM_ZOOM",
                value: value.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "history_capacity",
                value: "0".to_string(),
            });
        }
        self.initial_zoom = self.initial_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.keys.validate()
    }
}

/// Character keys for each command. Matching ignores ASCII case. Arrow keys
/// always move and Esc always quits, whatever is configured here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub undo: char,
    pub reload: char,
    pub zoom_in: char,
    pub zoom_out: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
            undo: 'u',
            reload: 'r',
            zoom_in: '+',
            zoom_out: '-',
            quit: 'q',
        }
    }
}

impl KeyBindings {
    pub fn entries(&self) -> [(char, KeyCommand); 9] {
        [
            (self.up, KeyCommand::Move(Direction::Up)),
            (self.down, KeyCommand::Move(Direction::Down)),
            (self.left, KeyCommand::Move(Direction::Left)),
            (self.right, KeyCommand::Move(Direction::Right)),
            (self.undo, KeyCommand::Undo),
            (self.reload, KeyCommand::Reload),
            (self.zoom_in, KeyCommand::ZoomIn),
            (self.zoom_out, KeyCommand::ZoomOut),
            (self.quit, KeyCommand::Quit),
        ]
    }

    pub fn command_for(&self, ch: char) -> Option<KeyCommand> {
        self.entries()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&ch))
            .map(|(_, command)| command)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.entries();
        for (idx, (key, first)) in entries.iter().enumerate() {
            if let Some((_, second)) = entries[idx + 1..]
                .iter()
                .find(|(other, _)| other.eq_ignore_ascii_case(key))
            {
                return Err(ConfigError::DuplicateBinding {
                    key: *key,
                    first: *first,
                    second: *second,
                });
            }
        }
        Ok(())
    }
}
