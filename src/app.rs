//! Level selection, play and end-of-level prompts, repeated until the player
//! leaves.

use tracing::{info, warn};

use crate::core::Result;
use crate::interfaces::{Frontend, LevelChoice, LevelStore, Notice, Question, SaveKind};
use crate::session::{AbortReason, Session, SessionSettings, SessionState};

pub struct App<S, F> {
    store: S,
    frontend: F,
    settings: SessionSettings,
}

impl<S: LevelStore, F: Frontend> App<S, F> {
    pub fn new(store: S, frontend: F, settings: SessionSettings) -> Self {
        App {
            store,
            frontend,
            settings,
        }
    }

    pub fn into_parts(self) -> (S, F) {
        (self.store, self.frontend)
    }

    /// Only terminal failures end the loop with an error. Level problems are
    /// reported and the player picks again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let available = self.store.list_levels().unwrap_or_else(|err| {
                warn!(%err, "cannot list levels");
                Vec::new()
            });
            let name = match self.frontend.choose_level(&available)? {
                LevelChoice::Exit => break,
                LevelChoice::Play(name) => name,
            };

            let mut session = match self.open(&name) {
                Ok(session) => session,
                Err(error) => {
                    warn!(level = %name, %error, "level rejected");
                    self.frontend.notify(Notice::LoadFailed {
                        level: &name,
                        error: &error,
                    })?;
                    continue;
                }
            };

            self.play(&mut session)?;
            self.finish(&session)?;

            if !self.frontend.confirm(Question::PlayAgain)? {
                break;
            }
        }
        info!("leaving");
        self.frontend.notify(Notice::Goodbye)
    }

    fn open(&self, name: &str) -> Result<Session> {
        let source = self.store.load_level(name)?;
        Session::start(name, &source, &self.settings)
    }

    fn play(&mut self, session: &mut Session) -> Result<()> {
        self.frontend.begin_play()?;
        let result = self.play_loop(session);
        let cleanup = self.frontend.end_play();
        result.and(cleanup)
    }

    fn play_loop(&mut self, session: &mut Session) -> Result<()> {
        self.frontend.render(&session.view())?;
        while !session.is_over() {
            if let Some(command) = self.frontend.poll()? {
                session.handle(command);
                self.frontend.render(&session.view())?;
            }
        }

        if session.state() == SessionState::Won {
            // leave the finished board up until the next key
            while self.frontend.poll()?.is_none() {}
        }
        Ok(())
    }

    fn finish(&mut self, session: &Session) -> Result<()> {
        match session.state() {
            SessionState::Won => {
                self.frontend.notify(Notice::Won {
                    moves: session.move_count(),
                    grid: session.grid(),
                })?;
                self.offer_history_save(session)
            }
            SessionState::Aborted(AbortReason::Quit) => {
                self.frontend.notify(Notice::Abandoned)?;
                if self.frontend.confirm(Question::SaveLevel)? {
                    let name = self.frontend.ask_save_name(SaveKind::Level)?;
                    let saved = self.store.save_level(&name, session.grid());
                    self.report_save(SaveKind::Level, saved)?;
                }
                self.offer_history_save(session)
            }
            SessionState::Aborted(AbortReason::HistoryOverflow) => {
                self.frontend.notify(Notice::HistoryOverflow {
                    capacity: session.history().capacity(),
                })
            }
            SessionState::Playing => Ok(()),
        }
    }

    fn offer_history_save(&mut self, session: &Session) -> Result<()> {
        if !self.frontend.confirm(Question::SaveHistory)? {
            return Ok(());
        }
        let name = self.frontend.ask_save_name(SaveKind::History)?;
        let saved = self.store.save_history(&name, session.history().moves());
        self.report_save(SaveKind::History, saved)
    }

    fn report_save(&mut self, kind: SaveKind, saved: Result<std::path::PathBuf>) -> Result<()> {
        match saved {
            Ok(path) => self.frontend.notify(Notice::Saved { kind, path: &path }),
            Err(error) => {
                warn!(?kind, %error, "save failed");
                self.frontend.notify(Notice::SaveFailed {
                    kind,
                    error: &error,
                })
            }
        }
    }
}
