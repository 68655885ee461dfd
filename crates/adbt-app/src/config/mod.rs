//! Configuration file parsing for adbt
//!
//! Supports `<config_dir>/adbt/config.toml`, or any path given with `--config`.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, parse_settings};
pub use types::*;
