//! Keybinding definitions for the TUI.
//!
//! The same key means different things depending on what has focus: an
//! open confirmation prompt swallows everything but confirm/cancel, an open
//! overflow menu turns `j`/`k` into highlight movement, and text entry takes
//! printable characters literally.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Menu,
    Confirm,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    ToggleSelect,
    ToggleAll,
    OpenRowMenu,
    OpenListMenu,
    Activate,
    Confirm,
    Cancel,
    EditFilter,
    TogglePoller,
    Refresh,
    OpenHelp,
    /// Any other printable key; resolved against toolbar shortcuts.
    Shortcut(char),
    Input(char),
    Backspace,
    NextField,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') if mode == InputMode::Normal => Some(Action::Refresh),
            _ => None,
        };
    }

    match mode {
        InputMode::Confirm => match code {
            KeyCode::Enter | KeyCode::Char('y') => Some(Action::Confirm),
            KeyCode::Esc | KeyCode::Char('n') => Some(Action::Cancel),
            _ => None,
        },
        InputMode::Text => match code {
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        InputMode::Menu => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Esc | KeyCode::Char('.') | KeyCode::Char('m') => Some(Action::Cancel),
            KeyCode::Char(c) => Some(Action::Shortcut(c)),
            _ => None,
        },
        InputMode::Normal => map_normal(code),
    }
}

fn map_normal(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::EditFilter),
        KeyCode::Char('p') => Some(Action::TogglePoller),
        KeyCode::Char(' ') => Some(Action::ToggleSelect),
        KeyCode::Char('a') => Some(Action::ToggleAll),
        KeyCode::Char('.') => Some(Action::OpenRowMenu),
        KeyCode::Char('m') => Some(Action::OpenListMenu),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|digit| Action::SwitchView(digit as usize - 1)),
        KeyCode::Char(c) => Some(Action::Shortcut(c)),
        _ => None,
    }
}
