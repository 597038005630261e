#![forbid(unsafe_code)]

//! Key bindings.

use bgfx_core::{Event, KeyCode, KeyEvent, KeyEventKind};
use bgfx_fx::Command;

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forwarded to the stage.
    Engine(Command),
    ToggleHelp,
    /// Write the color report to the log.
    DumpColors,
}

/// Map a key event. Releases are ignored; auto-repeat acts like a press so
/// holding a key keeps adjusting the selected parameter.
pub fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = match key.code {
        KeyCode::Escape => Action::Engine(Command::Quit),
        KeyCode::Char('c') if key.ctrl() => Action::Engine(Command::Quit),
        KeyCode::Char('q') => Action::Engine(Command::Quit),
        KeyCode::Char(']') => Action::Engine(Command::NextImage),
        KeyCode::Char('[') => Action::Engine(Command::PreviousImage),
        KeyCode::Down => Action::Engine(Command::NextParameter),
        KeyCode::Up => Action::Engine(Command::PreviousParameter),
        KeyCode::Right => Action::Engine(Command::IncreaseParameter),
        KeyCode::Left => Action::Engine(Command::DecreaseParameter),
        KeyCode::Char('r') => Action::Engine(Command::RandomizeParameters),
        KeyCode::Char(' ') => Action::Engine(Command::ResetParameters),
        KeyCode::Char('h') => Action::ToggleHelp,
        KeyCode::Char('p') => Action::DumpColors,
        _ => return None,
    };
    Some(action)
}

/// Map any event; only key events produce actions.
pub fn map_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize { .. } => None,
    }
}
