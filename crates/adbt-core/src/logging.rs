//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "adbt.log";

/// Initialize the logging subsystem
///
/// The terminal belongs to the TUI, so logs only go to
/// `~/.local/share/adbt/logs/`. Level is controlled by the `ADBT_LOG`
/// environment variable.
///
/// # Examples
/// ```bash
/// ADBT_LOG=debug adbt
/// ADBT_LOG=adbt_app=trace adbt
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("adbt starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Default to info for our crates, allow override via ADBT_LOG
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("ADBT_LOG").unwrap_or_else(|_| {
        EnvFilter::new("adbt=info,adbt_core=info,adbt_bridge=info,adbt_app=info,adbt_tui=info,warn")
    })
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("adbt").join("logs")
}

/// Get the log file path (the appender adds a date suffix)
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_filter_reads_adbt_log() {
        std::env::set_var("ADBT_LOG", "adbt_app=trace");
        let filter = env_filter().to_string();
        std::env::remove_var("ADBT_LOG");
        assert!(filter.contains("adbt_app=trace"));
    }

    #[test]
    #[serial]
    fn test_env_filter_default() {
        std::env::remove_var("ADBT_LOG");
        let filter = env_filter().to_string();
        assert!(filter.contains("adbt=info"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn test_log_file_lives_under_adbt_logs() {
        let path = get_current_log_file();
        assert!(path.ends_with("adbt/logs/adbt.log"));
    }
}
