//! Headless replay of a saved move history against a level.

use thiserror::Error;

use crate::core::{GameError, Grid, HistoryDecodeError, KeyCommand, MoveRecord, decode_history};
use crate::session::{Session, SessionEvent, SessionSettings, SessionState};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Level(#[from] GameError),

    #[error(transparent)]
    Decode(#[from] HistoryDecodeError),

    #[error("move {index} ({record:?}) is blocked")]
    Blocked { index: usize, record: MoveRecord },

    #[error("move {index} recorded a push of {recorded} but the board gives {actual}")]
    PushMismatch {
        index: usize,
        recorded: bool,
        actual: bool,
    },

    #[error("{remaining} moves recorded after the level was already solved")]
    MovesAfterWin { remaining: usize },
}

#[derive(Clone, Debug)]
pub struct ReplayReport {
    pub grid: Grid,
    pub moves: usize,
    pub won: bool,
}

pub fn replay(
    level_name: &str,
    level: &[u8],
    history: &[u8],
    settings: &SessionSettings,
) -> Result<ReplayReport, ReplayError> {
    let records = decode_history(history)?;
    let settings = SessionSettings {
        history_capacity: settings.history_capacity.max(records.len()),
        ..*settings
    };
    let mut session = Session::start(level_name, level, &settings)?;

    for (index, &record) in records.iter().enumerate() {
        if session.state() == SessionState::Won {
            return Err(ReplayError::MovesAfterWin {
                remaining: records.len() - index,
            });
        }
        match session.handle(KeyCommand::Move(record.direction)) {
            SessionEvent::Moved(applied) if applied.pushed_box == record.pushed_box => {}
            SessionEvent::Moved(applied) => {
                return Err(ReplayError::PushMismatch {
                    index,
                    recorded: record.pushed_box,
                    actual: applied.pushed_box,
                });
            }
            _ => return Err(ReplayError::Blocked { index, record }),
        }
    }

    Ok(ReplayReport {
        grid: session.grid().clone(),
        moves: session.move_count(),
        won: session.state() == SessionState::Won,
    })
}
