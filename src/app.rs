use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::pattern::{Category, Pattern, PatternField};
use crate::progress::{summarize, Summary};
use crate::session::{ConfigState, Session};

/// How many ticks a status message stays on screen
pub const STATUS_TICKS: u8 = 12;
const PAGE_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Counting,
    Help,
}

/// Which half of the counting screen receives the arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Config,
    Reps,
}

impl Pane {
    fn toggle(self) -> Self {
        match self {
            Pane::Config => Pane::Reps,
            Pane::Reps => Pane::Config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub ticks_left: u8,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub pane: Pane,
    pub field: PatternField,
    /// Selected repetition, 1-based
    pub rep: u32,
    pub category: Category,
    /// First repetition row shown in the table, 0-based
    pub scroll_offset: usize,
    pub status: Option<StatusMessage>,
    pub summary: Summary,
}

impl App {
    /// Start a session whose pattern is `start`, routed through the clamping setters
    pub fn new(start: Pattern) -> Self {
        let mut session = Session::new();
        let config = session.initialize();
        for field in PatternField::ALL {
            config.set(field, start.get(field) as i64);
        }
        let summary = summarize(config);

        Self {
            session,
            state: AppState::Counting,
            pane: Pane::Reps,
            field: PatternField::Round,
            rep: 1,
            category: Category::Standard,
            scroll_offset: 0,
            status: None,
            summary,
        }
    }

    pub fn config(&mut self) -> &mut ConfigState {
        self.session.initialize()
    }

    pub fn pattern(&self) -> Pattern {
        self.session
            .state()
            .map(|s| *s.pattern())
            .unwrap_or_default()
    }

    /// Recompute derived totals and keep the selection inside the row
    pub fn refresh(&mut self) {
        self.summary = summarize(self.session.initialize());
        let reps = self.summary.reps_count;
        self.rep = self.rep.clamp(1, reps);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            ticks_left: STATUS_TICKS,
        });
    }

    /// Age the status message. Returns true if the screen needs a redraw.
    pub fn on_tick(&mut self) -> bool {
        match self.status.as_mut() {
            Some(status) if status.ticks_left > 1 => {
                status.ticks_left -= 1;
                false
            }
            Some(_) => {
                self.status = None;
                true
            }
            None => false,
        }
    }

    pub fn reset_all(&mut self) {
        self.config().reset_all();
        self.refresh();
        let round = self.summary.round;
        self.set_status(format!("Reset all: round {} kept", round));
    }

    pub fn next_round(&mut self) {
        let round = self.config().adjust(PatternField::Round, 1);
        info!(round, "advanced round");
        self.refresh();
        self.set_status(format!("Round {}", round));
    }

    fn adjust_selected(&mut self, delta: i64) {
        match self.pane {
            Pane::Config => {
                let field = self.field;
                self.config().adjust(field, delta);
            }
            Pane::Reps => {
                let (rep, category) = (self.rep, self.category);
                if let Err(e) = self.config().adjust_done(rep, category, delta) {
                    warn!(error = %e, "selection outside the row");
                }
            }
        }
        self.refresh();
        if self.pane == Pane::Reps && self.summary.is_row_complete() {
            self.set_status("Row complete!");
        }
    }

    fn fill_selected(&mut self) {
        let rep = self.rep;
        if let Err(e) = self.config().fill_rep(rep) {
            warn!(error = %e, "fill outside the row");
        }
        self.refresh();
        self.set_status(format!("Rep {} done", rep));
    }

    fn clear_selected(&mut self) {
        let rep = self.rep;
        if let Err(e) = self.config().clear_rep(rep) {
            warn!(error = %e, "clear outside the row");
        }
        self.refresh();
        self.set_status(format!("Rep {} cleared", rep));
    }

    fn move_selection(&mut self, down: bool) {
        match self.pane {
            Pane::Config => {
                let pos = PatternField::ALL
                    .iter()
                    .position(|&f| f == self.field)
                    .unwrap_or(0);
                let next = if down {
                    (pos + 1).min(PatternField::ALL.len() - 1)
                } else {
                    pos.saturating_sub(1)
                };
                self.field = PatternField::ALL[next];
            }
            Pane::Reps => self.step_rep(if down { 1 } else { -1 }),
        }
    }

    fn step_rep(&mut self, delta: i64) {
        let reps = self.summary.reps_count as i64;
        self.rep = (self.rep as i64 + delta).clamp(1, reps.max(1)) as u32;
    }

    /// Map a key press onto the session. Totals are recomputed before returning.
    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        debug!(code = ?key.code, state = ?self.state, pane = ?self.pane, "key");

        match self.state {
            AppState::Help => match key.code {
                KeyCode::Char('q') => return Action::Quit,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('b') | KeyCode::Backspace => {
                    self.state = AppState::Counting;
                }
                _ => {}
            },
            AppState::Counting => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
                KeyCode::Char('?') => self.state = AppState::Help,
                KeyCode::Tab | KeyCode::BackTab => self.pane = self.pane.toggle(),
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
                KeyCode::Left | KeyCode::Char('h') => match self.pane {
                    Pane::Config => self.adjust_selected(-1),
                    Pane::Reps => self.category = self.category.prev(),
                },
                KeyCode::Right | KeyCode::Char('l') => match self.pane {
                    Pane::Config => self.adjust_selected(1),
                    Pane::Reps => self.category = self.category.next(),
                },
                KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_selected(1),
                KeyCode::Char('-') | KeyCode::Char('_') => self.adjust_selected(-1),
                KeyCode::Char('f') if self.pane == Pane::Reps => self.fill_selected(),
                KeyCode::Char('c') if self.pane == Pane::Reps => self.clear_selected(),
                KeyCode::Char('n') => self.next_round(),
                KeyCode::Char('R') => self.reset_all(),
                KeyCode::PageUp => self.step_rep(-(PAGE_STEP as i64)),
                KeyCode::PageDown => self.step_rep(PAGE_STEP as i64),
                KeyCode::Home => self.rep = 1,
                KeyCode::End => self.rep = self.summary.reps_count.max(1),
                _ => {}
            },
        }
        Action::Continue
    }

    /// Move the table window so the selected repetition is among `visible` rows
    pub fn scroll_to_selection(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        let selected = (self.rep as usize).saturating_sub(1);
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + visible {
            self.scroll_offset = selected + 1 - visible;
        }
        let max_offset = (self.summary.reps_count as usize).saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
