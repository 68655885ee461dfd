//! adbt-tui - Terminal UI for adbt
//!
//! This crate provides the ratatui-based terminal interface. It drives the
//! orchestration engine from adbt-app and adds terminal rendering, event
//! polling, and one widget per screen.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run;
