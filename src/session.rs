//! Per-level state machine.
//!
//! [`Session::start`] is the loading step: it parses the level, finds the
//! player and enters `Playing` (or `Won` straight away for a level without
//! targets). Each [`KeyCommand`] is then fully resolved by [`Session::handle`]
//! before it returns.

use tracing::{debug, error, info};

use crate::config::GameConfig;
use crate::core::{
    BaseLayout, Direction, GameError, Grid, KeyCommand, LevelDefect, MoveHistory, MoveOutcome,
    MoveRecord, Result, Vec2, count_boxes_on_targets, count_players, is_won, load, locate_player,
    resolve, unapply,
};
use crate::models::GameRenderState;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Won,
    Aborted(AbortReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbortReason {
    Quit,
    HistoryOverflow,
}

/// What a single command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Moved(MoveRecord),
    Blocked,
    Undone(MoveRecord),
    NothingToUndo,
    Reloaded,
    Zoomed(u8),
    HistoryFull,
    Quit,
    /// The session is over; commands no longer apply.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub history_capacity: usize,
    pub initial_zoom: u8,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for SessionSettings {
    fn from(config: &GameConfig) -> Self {
        SessionSettings {
            history_capacity: config.history_capacity,
            initial_zoom: config.initial_zoom,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    level_name: String,
    base: BaseLayout,
    grid: Grid,
    start: Vec2,
    player: Vec2,
    history: MoveHistory,
    zoom: u8,
    state: SessionState,
}

impl Session {
    /// Loads a standard 12x12 level from raw bytes.
    pub fn start(level_name: &str, source: &[u8], settings: &SessionSettings) -> Result<Self> {
        let (grid, base) = load(source)?;
        Self::from_layout(level_name, grid, base, settings)
    }

    pub fn from_layout(
        level_name: &str,
        grid: Grid,
        base: BaseLayout,
        settings: &SessionSettings,
    ) -> Result<Self> {
        let player = locate_player(&grid)?;
        let players = count_players(&grid);
        if players > 1 {
            return Err(GameError::MalformedLevel(LevelDefect::MultiplePlayers {
                count: players,
            }));
        }

        let mut session = Session {
            level_name: level_name.to_string(),
            base,
            grid,
            start: player,
            player,
            history: MoveHistory::with_capacity(settings.history_capacity),
            zoom: settings.initial_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            state: SessionState::Playing,
        };
        info!(
            level = %session.level_name,
            targets = session.base.target_count(),
            "level loaded"
        );
        session.check_won();
        Ok(session)
    }

    pub fn handle(&mut self, command: KeyCommand) -> SessionEvent {
        if self.is_over() {
            return SessionEvent::Ignored;
        }

        let event = match command {
            KeyCommand::Move(dir) => self.step(dir),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Reload => self.reload(),
            KeyCommand::ZoomIn => self.zoom_to(self.zoom.saturating_add(1)),
            KeyCommand::ZoomOut => self.zoom_to(self.zoom.saturating_sub(1)),
            KeyCommand::Quit => {
                info!(level = %self.level_name, moves = self.move_count(), "level abandoned");
                self.state = SessionState::Aborted(AbortReason::Quit);
                SessionEvent::Quit
            }
        };
        debug!(?command, ?event, moves = self.move_count(), "command handled");
        event
    }

    fn step(&mut self, dir: Direction) -> SessionEvent {
        let MoveOutcome::Moved { record, player } =
            resolve(&mut self.grid, &self.base, self.player, dir)
        else {
            return SessionEvent::Blocked;
        };

        if let Err(err) = self.history.record(record) {
            // keep the grid consistent with the recorded history
            unapply(&mut self.grid, &self.base, player, record);
            error!(level = %self.level_name, %err, "session ended");
            self.state = SessionState::Aborted(AbortReason::HistoryOverflow);
            return SessionEvent::HistoryFull;
        }

        self.player = player;
        self.check_won();
        SessionEvent::Moved(record)
    }

    fn undo(&mut self) -> SessionEvent {
        let Some(record) = self.history.last() else {
            return SessionEvent::NothingToUndo;
        };
        self.player = self.history.undo(&mut self.grid, &self.base, self.player);
        self.check_won();
        SessionEvent::Undone(record)
    }

    fn reload(&mut self) -> SessionEvent {
        self.grid = self.base.initial_grid().clone();
        self.player = self.start;
        self.history.clear();
        info!(level = %self.level_name, "level reloaded");
        self.check_won();
        SessionEvent::Reloaded
    }

    fn zoom_to(&mut self, zoom: u8) -> SessionEvent {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        SessionEvent::Zoomed(self.zoom)
    }

    fn check_won(&mut self) {
        if is_won(&self.grid, &self.base) {
            info!(level = %self.level_name, moves = self.move_count(), "level complete");
            self.state = SessionState::Won;
        }
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn base(&self) -> &BaseLayout {
        &self.base
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != SessionState::Playing
    }

    pub fn view(&self) -> GameRenderState<'_> {
        GameRenderState {
            level_name: &self.level_name,
            grid: &self.grid,
            zoom: self.zoom,
            move_count: self.move_count(),
            boxes_on_targets: count_boxes_on_targets(&self.grid),
            target_count: self.base.target_count(),
            state: self.state,
        }
    }
}
