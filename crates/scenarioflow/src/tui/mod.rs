//! TUI (Terminal User Interface) module
//!
//! Interactive progress view built on ratatui

pub mod terminal;
pub mod viewer;

pub use viewer::TuiRenderer;
