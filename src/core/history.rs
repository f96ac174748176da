//! Reversible move history.
//!
//! Each accepted move is kept as a [`MoveRecord`]; undo pops the last one and
//! walks the player (and any pushed box) back one cell. The history has an
//! explicit capacity: recording past it is refused with
//! [`GameError::HistoryOverflow`].
//!
//! On disk a history is one byte per move: `h b g d` (haut, bas, gauche,
//! droite) for a plain step, `H B G D` for a step that pushed a box. These are
//! the letters of the classic `.dep` files.

use thiserror::Error;

use crate::core::errors::{GameError, Result};
use crate::core::level::{BaseLayout, Grid};
use crate::core::models::{Direction, MoveRecord, Vec2};
use crate::core::update::unapply;

pub const DEFAULT_HISTORY_CAPACITY: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move byte {byte:#04x} at index {index}")]
pub struct HistoryDecodeError {
    pub index: usize,
    pub byte: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
    capacity: usize,
}

impl Default for MoveHistory {
    fn default() -> Self {
        MoveHistory::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MoveHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        MoveHistory {
            moves: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() >= self.capacity
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn last(&self) -> Option<MoveRecord> {
        self.moves.last().copied()
    }

    pub fn record(&mut self, record: MoveRecord) -> Result<()> {
        if self.is_full() {
            return Err(GameError::HistoryOverflow {
                capacity: self.capacity,
            });
        }
        self.moves.push(record);
        Ok(())
    }

    /// Takes back the last move. Returns the player position afterwards,
    /// which is `player` unchanged when there is nothing to undo.
    pub fn undo(&mut self, grid: &mut Grid, base: &BaseLayout, player: Vec2) -> Vec2 {
        match self.moves.pop() {
            Some(record) => unapply(grid, base, player, record),
            None => player,
        }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode(&self.moves)
    }
}

pub fn encode_move(record: MoveRecord) -> u8 {
    let byte = match record.direction {
        Direction::Up => b'h',
        Direction::Down => b'b',
        Direction::Left => b'g',
        Direction::Right => b'd',
    };
    if record.pushed_box {
        byte.to_ascii_uppercase()
    } else {
        byte
    }
}

pub fn decode_move(byte: u8) -> Option<MoveRecord> {
    let direction = match byte.to_ascii_lowercase() {
        b'h' => Direction::Up,
        b'b' => Direction::Down,
        b'g' => Direction::Left,
        b'd' => Direction::Right,
        _ => return None,
    };
    Some(MoveRecord {
        direction,
        pushed_box: byte.is_ascii_uppercase(),
    })
}

pub fn encode(moves: &[MoveRecord]) -> Vec<u8> {
    moves.iter().copied().map(encode_move).collect()
}

/// Decodes a saved history. Trailing whitespace (a final newline added by an
/// editor) is ignored.
pub fn decode(bytes: &[u8]) -> std::result::Result<Vec<MoveRecord>, HistoryDecodeError> {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |last| last + 1);
    bytes[..end]
        .iter()
        .enumerate()
        .map(|(index, &byte)| decode_move(byte).ok_or(HistoryDecodeError { index, byte }))
        .collect()
}
