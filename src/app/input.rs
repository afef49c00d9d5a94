//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation within a list
    Up,
    Down,
    Top,
    Bottom,

    // Selection
    Select,
    Back,

    // Screen switching
    GotoPractice,
    GotoDashboard,
    GotoHistory,

    // History actions
    Retry,

    // Data management
    Reset,

    Quit,
}

/// Key mapping for the browse screens (dashboard, history)
///
/// The practice screen routes printable keys into its input fields instead,
/// so it only uses [`typing_key_to_action`].
pub fn browse_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('p') | KeyCode::Char('1') => Some(Action::GotoPractice),
        KeyCode::Char('d') | KeyCode::Char('2') => Some(Action::GotoDashboard),
        KeyCode::Char('h') | KeyCode::Char('3') => Some(Action::GotoHistory),
        KeyCode::Char('r') => Some(Action::Retry),
        KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping while an input field is focused (practice screen)
///
/// Only Ctrl chords and a few non-printable keys act here; everything else
/// belongs to the focused field.
pub fn typing_key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('d') => Some(Action::GotoDashboard),
            KeyCode::Char('h') => Some(Action::GotoHistory),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}
