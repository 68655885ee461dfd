//! Tool availability checking
//!
//! Looks up the `adb` binary and the screen-mirroring companion once at
//! startup so the UI can warn instead of failing on first use.

use std::path::{Path, PathBuf};

/// Cached availability of the external tools adbt drives
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    /// Resolved path to `adb`, if found
    pub adb: Option<PathBuf>,

    /// Resolved path to the mirroring tool (scrcpy), if found
    pub mirror: Option<PathBuf>,
}

impl ToolAvailability {
    /// Check tool availability (run once at startup)
    pub fn check(adb_path: &Path, mirror_path: &Path) -> Self {
        Self {
            adb: Self::resolve(adb_path),
            mirror: Self::resolve(mirror_path),
        }
    }

    /// Resolve a bare name through PATH, or verify an explicit path
    fn resolve(program: &Path) -> Option<PathBuf> {
        which::which(program)
            .inspect_err(|e| tracing::debug!("{} not resolved: {}", program.display(), e))
            .ok()
    }

    pub fn has_adb(&self) -> bool {
        self.adb.is_some()
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.is_some()
    }

    /// User-facing message when adb is missing
    pub fn adb_unavailable_message(&self) -> Option<&'static str> {
        if self.has_adb() {
            None
        } else {
            Some("adb not found. Install Android platform-tools or set bridge.adb_path.")
        }
    }

    /// User-facing message when the mirroring tool is missing
    pub fn mirror_unavailable_message(&self) -> Option<&'static str> {
        if self.has_mirror() {
            None
        } else {
            Some("scrcpy not found in PATH")
        }
    }
}
