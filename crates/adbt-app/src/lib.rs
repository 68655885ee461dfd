//! adbt-app - Application state and orchestration for adbt
//!
//! This crate implements the TEA (The Elm Architecture) pattern: screens,
//! overlays and toasts mutate state only inside `update`, and every side
//! effect is a [`Command`] run by the [`Dispatcher`] and reported back as a
//! [`Message`]. It also owns settings loading and signal handling. Nothing
//! here touches the terminal.

pub mod actions;
pub mod command;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod overlay;
pub mod process;
pub mod screens;
pub mod signals;
pub mod state;
pub mod toast;

// Re-export primary types
pub use actions::Dispatcher;
pub use command::Command;
pub use handler::UpdateResult;
pub use input_key::InputKey;
pub use message::{Completion, Message};
pub use process::process_message;
pub use screens::{Screen, ScreenController};
pub use state::{AppContext, AppState, ScreenId, ScrollState};
pub use toast::Toast;

// Re-export bridge types for the TUI
pub use adbt_bridge::{AdbClient, ToolAvailability};
pub use adbt_core::Device;
