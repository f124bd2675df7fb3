//! Terminal front end for the order form.
//!
//! Ratatui renders the form state; crossterm key events drive the form
//! operations one at a time.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
