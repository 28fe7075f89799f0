use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::{render_counting, render_help};

/// A UI Screen boundary: responsible for rendering the current app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Configuration, repetition table and progress side by side
pub struct CountingScreen;

impl Screen for CountingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_counting(app, f);
    }
}

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, _app: &mut App, f: &mut Frame) {
        render_help(f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Counting => Box::new(CountingScreen),
        AppState::Help => Box::new(HelpScreen),
    }
}
