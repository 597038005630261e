#![forbid(unsafe_code)]

//! Core: terminal lifecycle and canonical key events.

pub mod event;
pub mod terminal_session;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use terminal_session::{SessionOptions, TerminalSession};
