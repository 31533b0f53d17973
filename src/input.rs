//! Terminal key events to per-tick input

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    Reset,
    Quit,
}

/// Space / Up / Enter flap, `r` resets, Esc / `q` / Ctrl-C quit.
pub fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Action::Flap),
        KeyCode::Char('r') => Some(Action::Reset),
        _ => None,
    }
}

impl TickInput {
    /// Fold one polled event into this tick's input.
    pub fn record(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        match map_key(key) {
            Some(Action::Flap) => self.flap = true,
            Some(Action::Reset) => self.reset = true,
            Some(Action::Quit) => self.quit = true,
            None => {}
        }
    }
}
