//! Event handling for the application.
//!
//! This module turns terminal input into application events.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// An application event consumed by `App::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
}
