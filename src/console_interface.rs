use crate::config::{GameConfig, KeyBindings};
use crate::core::{Direction, GameError, Grid, KeyCommand, Result, Tile};
use crate::interfaces::{
    Frontend, InputSource, LevelChoice, Notice, Prompter, Question, Renderer, SaveKind,
};
use crate::models::GameRenderState;
use crate::session::SessionState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Typed at the level prompt to leave the game.
pub const EXIT_COMMAND: &str = "exit";

type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal() -> Result<ConsoleTerminal> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Raw-mode play screen plus line-based prompts between levels.
pub struct ConsoleFrontend {
    keys: KeyBindings,
    poll_interval: Duration,
    terminal: Option<ConsoleTerminal>,
}

impl ConsoleFrontend {
    pub fn new(config: &GameConfig) -> Self {
        ConsoleFrontend {
            keys: config.keys.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            terminal: None,
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(GameError::Terminal(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Waits in raw mode for `y` or `n`.
    fn read_yes_no(&mut self) -> Result<bool> {
        crossterm::terminal::enable_raw_mode()?;
        let answer = loop {
            match event::read() {
                Ok(Event::Key(KeyEvent {
                    code: KeyCode::Char(ch),
                    kind: KeyEventKind::Press,
                    ..
                })) => match ch.to_ascii_lowercase() {
                    'y' => break Ok(true),
                    'n' => break Ok(false),
                    _ => {}
                },
                Ok(_) => {}
                Err(err) => break Err(err),
            }
        };
        crossterm::terminal::disable_raw_mode()?;
        Ok(answer?)
    }
}

impl Drop for ConsoleFrontend {
    fn drop(&mut self) {
        if self.terminal.take().is_some() {
            let _ = cleanup_terminal();
        }
    }
}

impl InputSource for ConsoleFrontend {
    fn poll(&mut self) -> Result<Option<KeyCommand>> {
        handle_input(&self.keys, self.poll_interval)
    }
}

impl Renderer for ConsoleFrontend {
    fn render(&mut self, state: &GameRenderState<'_>) -> Result<()> {
        let terminal = self.terminal.as_mut().ok_or_else(|| {
            GameError::Terminal(io::Error::other("play screen is not active"))
        })?;
        render_game(terminal, &self.keys, state)
    }
}

impl Prompter for ConsoleFrontend {
    fn choose_level(&mut self, available: &[String]) -> Result<LevelChoice> {
        let mut out = io::stdout();
        writeln!(out, "{}", "==================== SOKOBAN ====================".blue().bold())?;
        writeln!(out, "{}", "Available levels:".cyan())?;
        if available.is_empty() {
            writeln!(out, "  {}", "(no .sok files found)".dark_grey())?;
        }
        for name in available {
            writeln!(out, "  {}", name.as_str().magenta())?;
        }
        writeln!(out, "{}", format!("('{EXIT_COMMAND}' to quit)").red())?;

        loop {
            write!(out, "{}", "Enter a level: ".yellow())?;
            out.flush()?;
            let line = self.read_line()?;
            if line.is_empty() {
                continue;
            }
            if line == EXIT_COMMAND {
                return Ok(LevelChoice::Exit);
            }
            return Ok(LevelChoice::Play(line));
        }
    }

    fn confirm(&mut self, question: Question) -> Result<bool> {
        let mut out = io::stdout();
        write!(out, "{}", format!("{} (y/n) ", question.text()).yellow().bold())?;
        out.flush()?;
        let answer = self.read_yes_no()?;
        writeln!(out, "{}", if answer { "y" } else { "n" })?;
        Ok(answer)
    }

    fn ask_save_name(&mut self, kind: SaveKind) -> Result<String> {
        let mut out = io::stdout();
        let what = match kind {
            SaveKind::Level => "board",
            SaveKind::History => "moves",
        };
        loop {
            write!(out, "{}", format!("File name for the {what} (no extension): ").yellow())?;
            out.flush()?;
            let line = self.read_line()?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    fn notify(&mut self, notice: Notice<'_>) -> Result<()> {
        let mut out = io::stdout();
        match notice {
            Notice::LoadFailed { level, error } => {
                writeln!(out, "{}", format!("Cannot play '{level}': {error}").red())?;
            }
            Notice::Won { moves, grid } => {
                for line in render_grid_to_string(grid).lines() {
                    writeln!(out, "{line}")?;
                }
                writeln!(out, "{}", "Congratulations! Level complete.".cyan().bold())?;
                writeln!(out, "{} {}", "Total moves:".yellow(), moves.to_string().green())?;
            }
            Notice::Abandoned => {
                writeln!(out, "{}", "Level abandoned.".red().bold())?;
            }
            Notice::HistoryOverflow { capacity } => {
                writeln!(
                    out,
                    "{}",
                    format!("Too many moves (limit {capacity}): the game is over.").red()
                )?;
            }
            Notice::Saved { kind, path } => {
                let what = match kind {
                    SaveKind::Level => "Board",
                    SaveKind::History => "Moves",
                };
                writeln!(out, "{}", format!("{what} saved to {}", path.display()).dark_yellow())?;
            }
            Notice::SaveFailed { kind, error } => {
                let what = match kind {
                    SaveKind::Level => "board",
                    SaveKind::History => "moves",
                };
                writeln!(out, "{}", format!("Could not save {what}: {error}").red())?;
            }
            Notice::Goodbye => {
                writeln!(out, "{}", "Goodbye!".yellow().bold())?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl Frontend for ConsoleFrontend {
    fn begin_play(&mut self) -> Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(setup_terminal()?);
        }
        Ok(())
    }

    fn end_play(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            cleanup_terminal()?;
        }
        Ok(())
    }
}

pub fn render_game(
    terminal: &mut ConsoleTerminal,
    keys: &KeyBindings,
    state: &GameRenderState<'_>,
) -> Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let header = format!(
            "Level: {} | Moves: {} | Boxes on targets: {}/{} | Zoom: {}",
            state.level_name,
            state.move_count,
            state.boxes_on_targets,
            state.target_count,
            state.zoom
        );
        let header_paragraph = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL).title("Sokoban"))
            .style(Style::default().fg(Color::Blue))
            .alignment(Alignment::Center);
        f.render_widget(header_paragraph, chunks[0]);

        let board = Paragraph::new(render_grid_lines(state.grid, state.zoom))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(board, chunks[1]);

        let instructions = match state.state {
            SessionState::Won => "Level complete! Press a control key to continue.".to_string(),
            _ => controls_text(keys),
        };
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Controls"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub fn tile_glyph(tile: Tile) -> (char, Style) {
    match tile {
        Tile::Player => ('@', Style::default().fg(Color::Red)),
        Tile::PlayerOnTarget => ('@', Style::default().fg(Color::Magenta)),
        Tile::Box => ('$', Style::default().fg(Color::Green)),
        Tile::BoxOnTarget => ('$', Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Tile::Wall => ('#', Style::default().bg(Color::Indexed(239))),
        Tile::Target => ('.', Style::default().fg(Color::Yellow)),
        Tile::Floor => (' ', Style::default()),
    }
}

/// Colored board, each cell drawn `zoom` wide and `zoom` tall.
pub fn render_grid_lines(grid: &Grid, zoom: u8) -> Vec<Line<'static>> {
    let zoom = zoom.max(1) as usize;
    let mut lines = Vec::new();
    for row in grid.rows() {
        let spans: Vec<Span<'static>> = row
            .iter()
            .map(|&tile| {
                let (glyph, style) = tile_glyph(tile);
                Span::styled(glyph.to_string().repeat(zoom), style)
            })
            .collect();
        let line = Line::from(spans);
        for _ in 0..zoom {
            lines.push(line.clone());
        }
    }
    lines
}

/// Board in level-file symbols, one line per row.
pub fn render_grid_to_string(grid: &Grid) -> String {
    let mut result = String::new();
    for row in grid.rows() {
        for tile in row {
            result.push(tile.symbol());
        }
        result.push('\n');
    }
    result
}

pub fn controls_text(keys: &KeyBindings) -> String {
    format!(
        "{}/↑ up  {}/↓ down  {}/← left  {}/→ right | {} undo  {} reload  {}/{} zoom  {} quit",
        keys.up,
        keys.down,
        keys.left,
        keys.right,
        keys.undo,
        keys.reload,
        keys.zoom_in,
        keys.zoom_out,
        keys.quit
    )
}

pub fn map_key(keys: &KeyBindings, key: KeyEvent) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyCommand::Quit),
        KeyCode::Char(ch) => keys.command_for(ch),
        KeyCode::Up => Some(KeyCommand::Move(Direction::Up)),
        KeyCode::Down => Some(KeyCommand::Move(Direction::Down)),
        KeyCode::Left => Some(KeyCommand::Move(Direction::Left)),
        KeyCode::Right => Some(KeyCommand::Move(Direction::Right)),
        KeyCode::Esc => Some(KeyCommand::Quit),
        _ => None,
    }
}

pub fn handle_input(keys: &KeyBindings, timeout: Duration) -> Result<Option<KeyCommand>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(map_key(keys, key));
        }
    }
    Ok(None)
}
