//! Remote file browsing

use adbt_core::prelude::*;

use crate::bridge::{parse_lines, shell, DeviceBridge};

/// One row of an `ls -la` listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    /// Raw size column; empty for directories
    pub size: String,
    pub permissions: String,
}

/// Join a child name onto a directory, collapsing the root slash
pub fn child_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    format!("{}/{}", parent, name)
}

/// Parent directory; the parent of `/` is `/`
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}

/// Parse one `ls -la` row. Rows with fewer than seven fields are rejected.
pub fn parse_ls_line(line: &str, parent: &str) -> Option<FileEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        return None;
    }

    let permissions = fields[0];
    let is_dir = permissions.starts_with('d');

    let (name, size) = if fields.len() >= 8 {
        (fields[7..].join(" "), fields[4].to_string())
    } else {
        (fields[fields.len() - 1].to_string(), String::new())
    };

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(FileEntry {
        path: child_path(parent, &name),
        name,
        is_dir,
        size: if is_dir { String::new() } else { size },
        permissions: permissions.to_string(),
    })
}

pub fn parse_listing(output: &str, parent: &str) -> Vec<FileEntry> {
    parse_lines(output)
        .iter()
        .filter(|line| !line.starts_with("total"))
        .filter_map(|line| parse_ls_line(line, parent))
        .collect()
}

/// List a directory with `ls -la <path>/`
pub async fn list_dir<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    path: &str,
) -> Result<Vec<FileEntry>> {
    let target = if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    };
    let output = shell(bridge, serial, &["ls", "-la", target.as_str()]).await?;
    Ok(parse_listing(&output, path))
}

pub async fn delete_path<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    path: &str,
) -> Result<()> {
    info!("Deleting {} on {}", path, serial);
    shell(bridge, serial, &["rm", "-rf", path]).await?;
    Ok(())
}

/// `adb pull <remote> <local>`
pub async fn pull_file<B: DeviceBridge + ?Sized>(
    bridge: &B,
    serial: &str,
    remote: &str,
    local: &str,
) -> Result<()> {
    info!("Pulling {} from {} to {}", remote, serial, local);
    bridge
        .execute(Some(serial), &["pull", remote, local])
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;

    const LISTING: &str = "total 48\n\
        drwxrwx--x  4 root sdcard_rw 4096 2024-01-02 10:00 .\n\
        drwxr-xr-x 14 root root      4096 2024-01-02 10:00 ..\n\
        drwxrwx--x  2 root sdcard_rw 4096 2024-01-02 10:00 Download\n\
        -rw-rw----  1 root sdcard_rw 2048 2024-01-02 10:00 my notes.txt\n";

    #[test]
    fn test_parse_listing_skips_total_and_dots() {
        let entries = parse_listing(LISTING, "/sdcard");
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "Download");
        assert!(entries[0].is_dir);
        assert_eq!(entries[0].size, "");
        assert_eq!(entries[0].path, "/sdcard/Download");

        assert_eq!(entries[1].name, "my notes.txt");
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].size, "2048");
        assert_eq!(entries[1].permissions, "-rw-rw----");
    }

    #[test]
    fn test_parse_ls_line_short_rows() {
        assert!(parse_ls_line("drwx 1 root root 0 x", "/").is_none());
        let entry = parse_ls_line("-rw- 1 root root 0 today file", "/").unwrap();
        assert_eq!(entry.name, "file");
        assert_eq!(entry.size, "");
    }

    #[test]
    fn test_child_path_collapses_root() {
        assert_eq!(child_path("/", "sdcard"), "/sdcard");
        assert_eq!(child_path("/sdcard", "a"), "/sdcard/a");
        assert_eq!(child_path("/sdcard/", "a"), "/sdcard/a");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/a/b"), "/a");
        assert_eq!(parent_path("/a"), "/");
        assert_eq!(parent_path("/"), "/");
        assert_eq!(parent_path("/a/b/"), "/a");
    }

    #[tokio::test]
    async fn test_list_dir_appends_trailing_slash() {
        let bridge =
            FakeBridge::new().respond(&["-s", "abc", "shell", "ls", "-la", "/sdcard/"], LISTING);
        let entries = list_dir(&bridge, "abc", "/sdcard").await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_path_single_invocation() {
        let bridge = FakeBridge::new().respond(&["-s", "abc", "shell", "rm", "-rf", "/sdcard/x"], "");
        tokio_test::assert_ok!(delete_path(&bridge, "abc", "/sdcard/x").await);
        assert_eq!(bridge.calls(), vec!["-s abc shell rm -rf /sdcard/x"]);
    }
}
