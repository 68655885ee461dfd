//! adbt - A terminal UI for Android devices over adb
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;

use adbt_app::config::{self, Settings};
use adbt_app::{AdbClient, ToolAvailability};
use adbt_core::logging;
use adbt_core::prelude::*;

/// adbt - A terminal UI for Android devices over adb
#[derive(Parser, Debug)]
#[command(name = "adbt")]
#[command(about = "A terminal UI for Android devices over adb", long_about = None)]
struct Args {
    /// Path to the adb binary (overrides bridge.adb_path)
    #[arg(long, value_name = "PATH")]
    adb: Option<PathBuf>,

    /// Select this device once it is listed
    #[arg(long, value_name = "SERIAL")]
    serial: Option<String>,

    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logs go to a file, the terminal belongs to the TUI
    logging::init()?;

    let settings = load_settings(&args);
    let tools = ToolAvailability::check(&settings.bridge.adb_path, &settings.bridge.mirror_path);
    if !tools.has_adb() {
        warn!(
            "adb not found at {}, device commands will fail",
            settings.bridge.adb_path.display()
        );
    }
    let client = AdbClient::new(
        settings.bridge.adb_path.clone(),
        settings.bridge.mirror_path.clone(),
    );

    let result = adbt_tui::run(settings, tools, client, args.serial).await;

    match &result {
        Err(e) if e.is_fatal() => {
            error!("Fatal error: {}", e);
            eprintln!("adbt: {}", e);
            std::process::exit(1);
        }
        Err(e) => error!("Application error: {:?}", e),
        Ok(()) => {}
    }

    info!("adbt exiting");
    result
}

/// Settings from the config file with CLI overrides applied
fn load_settings(args: &Args) -> Settings {
    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(adb) = &args.adb {
        settings.bridge.adb_path = adb.clone();
    }
    info!("Using adb at {}", settings.bridge.adb_path.display());
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adb_flag_overrides_config() {
        let args = Args::parse_from([
            "adbt",
            "--adb",
            "/opt/sdk/adb",
            "--config",
            "/nonexistent/adbt.toml",
        ]);
        let settings = load_settings(&args);
        assert_eq!(settings.bridge.adb_path, PathBuf::from("/opt/sdk/adb"));
    }

    #[test]
    fn test_serial_flag() {
        let args = Args::parse_from(["adbt", "--serial", "emulator-5554"]);
        assert_eq!(args.serial.as_deref(), Some("emulator-5554"));
        assert!(args.adb.is_none());
    }
}
