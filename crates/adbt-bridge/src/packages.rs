//! Installed packages and per-app actions

use std::fmt;

use adbt_core::prelude::*;

use crate::bridge::{parse_lines, shell, DeviceBridge};

const SYSTEM_PREFIXES: [&str; 3] = ["/system", "/vendor", "/product"];

/// An installed package as reported by `pm list packages -f`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPackage {
    pub package: String,
    pub apk_path: String,
    pub is_system: bool,
}

impl AppPackage {
    pub fn new(package: impl Into<String>, apk_path: impl Into<String>) -> Self {
        let apk_path = apk_path.into();
        Self {
            package: package.into(),
            is_system: is_system_path(&apk_path),
            apk_path,
        }
    }
}

fn is_system_path(apk_path: &str) -> bool {
    SYSTEM_PREFIXES
        .iter()
        .any(|prefix| apk_path.starts_with(prefix))
}

/// Actions the app manager can run against a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Launch,
    ForceStop,
    Uninstall,
    ClearData,
}

impl AppAction {
    /// Sentence-case label used in result toasts
    pub fn label(&self) -> &'static str {
        match self {
            AppAction::Launch => "Launch",
            AppAction::ForceStop => "Force stop",
            AppAction::Uninstall => "Uninstall",
            AppAction::ClearData => "Clear data",
        }
    }

    /// Whether the action destroys state and should be confirmed
    pub fn is_destructive(&self) -> bool {
        !matches!(self, AppAction::Launch)
    }
}

impl fmt::Display for AppAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse `package:<apk>=<pkg>` lines, sorted by package name.
///
/// Split at the last `=` since apk paths may themselves contain one.
pub fn parse_packages(output: &str) -> Vec<AppPackage> {
    let mut apps: Vec<AppPackage> = parse_lines(output)
        .iter()
        .filter_map(|line| line.strip_prefix("package:"))
        .filter_map(|rest| {
            let (apk, package) = rest.rsplit_once('=')?;
            Some(AppPackage::new(package, apk))
        })
        .collect();

    apps.sort_by(|a, b| a.package.cmp(&b.package));
    apps
}

pub async fn list_packages<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
) -> Result<Vec<AppPackage>> {
    let output = shell(bridge, serial, &["pm", "list", "packages", "-f"]).await?;
    let apps = parse_packages(&output);
    debug!("Listed {} packages on {}", apps.len(), serial);
    Ok(apps)
}

/// Last output line that looks like a `pkg/activity` component
fn launcher_component(output: &str) -> Option<String> {
    parse_lines(output)
        .into_iter()
        .rev()
        .find(|line| line.contains('/'))
}

/// Resolve the launcher activity and start it
pub async fn launch_app<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    package: &str,
) -> Result<()> {
    let resolved = match shell(
        bridge,
        serial,
        &[
            "cmd",
            "package",
            "resolve-activity",
            "--brief",
            "-a",
            "android.intent.action.MAIN",
            "-c",
            "android.intent.category.LAUNCHER",
            package,
        ],
    )
    .await
    {
        Ok(output) => output,
        Err(e) => {
            debug!("launcher resolve failed for {}, retrying plain: {}", package, e);
            shell(
                bridge,
                serial,
                &["cmd", "package", "resolve-activity", "--brief", package],
            )
            .await
            .map_err(|e| Error::bridge(format!("failed to find activity: {}", e)))?
        }
    };

    let component = launcher_component(&resolved).ok_or_else(|| {
        Error::bridge(format!("no launchable activity found for {}", package))
    })?;

    shell(bridge, serial, &["am", "start", "-n", component.as_str()]).await?;
    Ok(())
}

pub async fn force_stop<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    package: &str,
) -> Result<()> {
    shell(bridge, serial, &["am", "force-stop", package]).await?;
    Ok(())
}

pub async fn uninstall<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    package: &str,
) -> Result<()> {
    bridge.execute(Some(serial), &["uninstall", package]).await?;
    Ok(())
}

pub async fn clear_data<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    package: &str,
) -> Result<()> {
    shell(bridge, serial, &["pm", "clear", package]).await?;
    Ok(())
}

/// Dispatch an [`AppAction`] to its bridge operation
pub async fn run_app_action<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    package: &str,
    action: AppAction,
) -> Result<()> {
    info!("{} {} on {}", action, package, serial);
    match action {
        AppAction::Launch => launch_app(bridge, serial, package).await,
        AppAction::ForceStop => force_stop(bridge, serial, package).await,
        AppAction::Uninstall => uninstall(bridge, serial, package).await,
        AppAction::ClearData => clear_data(bridge, serial, package).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;

    const LAUNCHER_ARGS: [&str; 12] = [
        "-s",
        "abc",
        "shell",
        "cmd",
        "package",
        "resolve-activity",
        "--brief",
        "-a",
        "android.intent.action.MAIN",
        "-c",
        "android.intent.category.LAUNCHER",
        "com.example.app",
    ];

    #[test]
    fn test_parse_packages_sorts_and_classifies() {
        let output = "package:/data/app/~~x==/com.zeta-1/base.apk=com.zeta\n\
                      package:/system/app/Settings/Settings.apk=com.android.settings\n\
                      garbage line\n\
                      package:/product/app/Maps.apk=com.google.maps\n";
        let apps = parse_packages(output);

        let names: Vec<_> = apps.iter().map(|a| a.package.as_str()).collect();
        assert_eq!(
            names,
            vec!["com.android.settings", "com.google.maps", "com.zeta"]
        );
        assert!(apps[0].is_system);
        assert!(apps[1].is_system);
        assert!(!apps[2].is_system);
        assert_eq!(apps[2].apk_path, "/data/app/~~x==/com.zeta-1/base.apk");
    }

    #[test]
    fn test_parse_packages_skips_lines_without_separator() {
        assert!(parse_packages("package:/data/app/base.apk\n").is_empty());
    }

    #[test]
    fn test_launcher_component_takes_last_slash_line() {
        let output = "priority=0 preferredOrder=0\ncom.example.app/.MainActivity\n";
        assert_eq!(
            launcher_component(output).as_deref(),
            Some("com.example.app/.MainActivity")
        );
        assert_eq!(launcher_component("No activity found\n"), None);
    }

    #[test]
    fn test_app_action_destructive() {
        assert!(!AppAction::Launch.is_destructive());
        assert!(AppAction::ForceStop.is_destructive());
        assert!(AppAction::Uninstall.is_destructive());
        assert!(AppAction::ClearData.is_destructive());
    }

    #[tokio::test]
    async fn test_launch_app_starts_resolved_component() {
        let bridge = FakeBridge::new()
            .respond(&LAUNCHER_ARGS, "com.example.app/.MainActivity\n")
            .respond(
                &[
                    "-s",
                    "abc",
                    "shell",
                    "am",
                    "start",
                    "-n",
                    "com.example.app/.MainActivity",
                ],
                "Starting: Intent",
            );

        launch_app(&bridge, "abc", "com.example.app").await.unwrap();
        assert_eq!(bridge.calls_matching("am start"), 1);
    }

    #[tokio::test]
    async fn test_launch_app_falls_back_to_plain_resolve() {
        let bridge = FakeBridge::new()
            .fail(&LAUNCHER_ARGS, "unknown option")
            .respond(
                &[
                    "-s",
                    "abc",
                    "shell",
                    "cmd",
                    "package",
                    "resolve-activity",
                    "--brief",
                    "com.example.app",
                ],
                "com.example.app/.Main\n",
            )
            .respond(
                &["-s", "abc", "shell", "am", "start", "-n", "com.example.app/.Main"],
                "",
            );

        launch_app(&bridge, "abc", "com.example.app").await.unwrap();
        assert_eq!(bridge.calls_matching("resolve-activity"), 2);
    }

    #[tokio::test]
    async fn test_launch_app_without_component_fails() {
        let bridge = FakeBridge::new().respond(&LAUNCHER_ARGS, "No activity found\n");
        let err = launch_app(&bridge, "abc", "com.example.app")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no launchable activity"));
        assert_eq!(bridge.calls_matching("am start"), 0);
    }

    #[tokio::test]
    async fn test_uninstall_is_not_a_shell_command() {
        let bridge =
            FakeBridge::new().respond(&["-s", "abc", "uninstall", "com.example.app"], "Success");
        run_app_action(&bridge, "abc", "com.example.app", AppAction::Uninstall)
            .await
            .unwrap();
        assert_eq!(bridge.calls(), vec!["-s abc uninstall com.example.app"]);
    }
}
