pub use dissimilar::diff as __diff;
use crate::console_interface::render_grid_to_string;
use crate::core::*;
use crate::session::{Session, SessionSettings};

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

/// Drops the surrounding newlines of a raw-string level and any trailing
/// spaces on each row.
pub fn normalize(text: &str) -> String {
    text.trim_matches('\n')
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a level of any size, padding short rows with floor.
pub fn parse_test_level(level: &str) -> (Grid, BaseLayout) {
    let text = level.trim_matches('\n');
    let rows = text.lines().count();
    let cols = text.lines().map(str::len).max().unwrap_or(0);
    let padded: String = text
        .lines()
        .map(|line| format!("{line:<cols$}\n"))
        .collect();
    load_sized(padded.as_bytes(), BoundsOriginRoot::new(rows as i32, cols as i32))
        .expect("test level parses")
}

pub fn test_session(level: &str) -> Session {
    test_session_with(level, SessionSettings::default())
}

pub fn test_session_with(level: &str, settings: SessionSettings) -> Session {
    let (grid, base) = parse_test_level(level);
    Session::from_layout("test", grid, base, &settings).expect("test level has one player")
}

pub fn session_to_string(session: &Session) -> String {
    normalize(&render_grid_to_string(session.grid()))
}

pub struct GameTestState {
    pub grid: Grid,
    pub base: BaseLayout,
    pub player: Vec2,
    pub history: MoveHistory,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        let (grid, base) = parse_test_level(level);
        let player = locate_player(&grid).expect("test level has a player");
        Self {
            grid,
            base,
            player,
            history: MoveHistory::default(),
        }
    }

    pub fn game_to_string(&self) -> String {
        normalize(&render_grid_to_string(&self.grid))
    }

    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = resolve(&mut self.grid, &self.base, self.player, direction);
        if let MoveOutcome::Moved { record, player } = outcome {
            self.history.record(record).expect("test history has room");
            self.player = player;
        }
        outcome
    }

    pub fn assert_move(&mut self, direction: Direction) -> MoveRecord {
        match self.try_move(direction) {
            MoveOutcome::Moved { record, .. } => record,
            MoveOutcome::Blocked => panic!(
                "Expected {:?} to move, but it was blocked in map\n{}",
                direction,
                self.game_to_string()
            ),
        }
    }

    pub fn assert_moves(&mut self, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(dir);
        }
    }

    pub fn assert_blocked(&mut self, direction: Direction) {
        let before = self.grid.clone();
        let outcome = self.try_move(direction);
        assert_eq!(outcome, MoveOutcome::Blocked, "expected {:?} to be blocked", direction);
        assert_eq!(self.grid, before, "blocked move changed the grid");
    }

    pub fn undo(&mut self) {
        self.player = self.history.undo(&mut self.grid, &self.base, self.player);
    }

    pub fn is_won(&self) -> bool {
        is_won(&self.grid, &self.base)
    }

    pub fn assert_matches(&self, expected: &str) {
        let expected = normalize(expected);
        let actual = self.game_to_string();
        assert_eq_text!(expected.as_str(), actual.as_str());
    }
}
