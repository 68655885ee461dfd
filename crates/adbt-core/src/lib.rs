//! # adbt-core - Core Domain Types
//!
//! Foundation crate for adbt. Provides domain types, error handling,
//! logging setup and size formatting.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (thiserror, tracing, dirs).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Device`] - A device reported by the bridge, keyed by serial
//! - [`DeviceState`] - Connection state (`device`, `offline`, `unauthorized`, ...)
//! - [`LogPriority`] - Android log priority (V/D/I/W/E/F)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum; [`Error::is_fatal`] marks errors that end the process
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use adbt_core::prelude::*;
//! ```

pub mod error;
pub mod format;
pub mod logging;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use format::{format_bytes, format_file_size, format_kb_blocks};
pub use types::{Device, DeviceState, LogPriority};
