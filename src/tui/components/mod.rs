//! Reusable UI components.

pub mod header;
pub mod line_table;
pub mod popup;
pub mod status_bar;
