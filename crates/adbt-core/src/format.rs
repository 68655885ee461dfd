//! Human-readable sizes

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

/// Format a byte count as B / KB / MB / GB
pub fn format_bytes(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a size column from `ls`; non-numeric input is returned as-is
pub fn format_file_size(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(n) => format_bytes(n),
        Err(_) => raw.to_string(),
    }
}

/// Format a count of 1K blocks as reported by `df`
pub fn format_kb_blocks(raw: &str) -> String {
    let Ok(blocks) = raw.trim().parse::<u64>() else {
        return raw.to_string();
    };
    let bytes = blocks.saturating_mul(1024) as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else {
        format!("{} KB", blocks)
    }
}
