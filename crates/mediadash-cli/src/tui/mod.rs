//! TUI module for the interactive dashboard.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod dashboard;
/// Dashboard view state types.
pub mod state;
mod ui;

pub use dashboard::run_dashboard;
