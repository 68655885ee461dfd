//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Device Bridge Errors
    // ─────────────────────────────────────────────────────────────
    #[error("adb not found. Ensure 'adb' is in your PATH or set bridge.adb_path.")]
    AdbNotFound,

    /// The bridge ran but reported failure; carries its trimmed output.
    #[error("{message}")]
    Bridge { message: String },

    #[error("Failed to spawn process: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Log stream error: {message}")]
    Stream { message: String },

    #[error("{tool} not found in PATH")]
    ToolMissing { tool: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }

    pub fn spawn(reason: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            reason: reason.into(),
        }
    }

    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    pub fn tool_missing(tool: impl Into<String>) -> Self {
        Self::ToolMissing { tool: tool.into() }
    }

    /// Check if this error should end the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TerminalInit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_displays_raw_output() {
        let err = Error::bridge("error: device offline");
        assert_eq!(err.to_string(), "error: device offline");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_only_terminal_init_is_fatal() {
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(!Error::AdbNotFound.is_fatal());
        assert!(!Error::bridge("boom").is_fatal());
    }

    #[test]
    fn test_tool_missing_names_tool() {
        let err = Error::tool_missing("scrcpy");
        assert_eq!(err.to_string(), "scrcpy not found in PATH");
    }
}
