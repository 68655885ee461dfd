//! Raw performance counters from `/proc`
//!
//! A [`SystemStats`] is a single sample. Rates and percentages come from
//! comparing two consecutive samples, see [`cpu_percent`] and [`rate`].

use adbt_core::prelude::*;

use crate::bridge::{shell, DeviceBridge};

/// One sample of cumulative counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemStats {
    /// Jiffies across all CPU states
    pub cpu_total: u64,
    /// Idle plus iowait jiffies
    pub cpu_idle: u64,
    /// kB
    pub mem_total: u64,
    /// kB
    pub mem_used: u64,
    /// kB
    pub mem_available: u64,
    pub net_rx_bytes: u64,
    pub net_tx_bytes: u64,
}

/// First `cpu` line of `/proc/stat` → (total, idle + iowait)
pub fn parse_cpu_stats(output: &str) -> (u64, u64) {
    let Some(line) = output.lines().next() else {
        return (0, 0);
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 || fields[0] != "cpu" {
        return (0, 0);
    }

    let values: Vec<u64> = fields[1..]
        .iter()
        .map(|f| f.parse().unwrap_or(0))
        .collect();
    let total = values.iter().sum();
    let idle = values[3] + values.get(4).copied().unwrap_or(0);
    (total, idle)
}

/// `/proc/meminfo` → (total, available) in kB.
///
/// Falls back to free + buffers + cached on kernels without `MemAvailable`.
pub fn parse_meminfo(output: &str) -> (u64, u64) {
    let (mut total, mut available) = (0, 0);
    let (mut free, mut buffers, mut cached) = (0, 0, 0);

    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        let value: u64 = value.parse().unwrap_or(0);
        match key.trim_end_matches(':') {
            "MemTotal" => total = value,
            "MemAvailable" => available = value,
            "MemFree" => free = value,
            "Buffers" => buffers = value,
            "Cached" => cached = value,
            _ => {}
        }
    }

    if available == 0 {
        available = free + buffers + cached;
    }
    (total, available)
}

/// `/proc/net/dev` → (rx, tx) bytes summed over every interface except `lo`
pub fn parse_net_dev(output: &str) -> (u64, u64) {
    let mut rx = 0u64;
    let mut tx = 0u64;
    for line in output.lines() {
        let Some((iface, counters)) = line.split_once(':') else {
            continue;
        };
        if iface.trim() == "lo" {
            continue;
        }
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            continue;
        }
        rx = rx.saturating_add(fields[0].parse().unwrap_or(0));
        tx = tx.saturating_add(fields[8].parse().unwrap_or(0));
    }
    (rx, tx)
}

/// Take one sample. Fails only if none of the three sources could be read.
pub async fn sample_stats<B: DeviceBridge + ?Sized>(bridge: &B, serial: &str) -> Result<SystemStats> {
    let mut stats = SystemStats::default();
    let mut last_error = None;

    match shell(bridge, serial, &["cat", "/proc/stat"]).await {
        Ok(out) => {
            (stats.cpu_total, stats.cpu_idle) = parse_cpu_stats(&out);
        }
        Err(e) => last_error = Some(e),
    }

    match shell(bridge, serial, &["cat", "/proc/meminfo"]).await {
        Ok(out) => {
            let (total, available) = parse_meminfo(&out);
            stats.mem_total = total;
            stats.mem_available = available;
            stats.mem_used = total.saturating_sub(available);
        }
        Err(e) => last_error = Some(e),
    }

    match shell(bridge, serial, &["cat", "/proc/net/dev"]).await {
        Ok(out) => {
            (stats.net_rx_bytes, stats.net_tx_bytes) = parse_net_dev(&out);
        }
        Err(e) => last_error = Some(e),
    }

    match last_error {
        Some(e) if stats == SystemStats::default() => Err(e),
        _ => Ok(stats),
    }
}

/// CPU utilisation between two samples, 0.0 when no time elapsed
pub fn cpu_percent(prev: &SystemStats, curr: &SystemStats) -> f64 {
    let total = curr.cpu_total.saturating_sub(prev.cpu_total);
    let idle = curr.cpu_idle.saturating_sub(prev.cpu_idle);
    if total == 0 {
        return 0.0;
    }
    (total.saturating_sub(idle)) as f64 / total as f64 * 100.0
}

/// Counter delta; `None` when the counter went backwards (wrap or reset)
pub fn rate(prev: u64, curr: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;

    #[test]
    fn test_parse_cpu_stats() {
        let output = "cpu  100 10 50 800 40 0 0 0 0 0\ncpu0 1 2 3 4 5\n";
        assert_eq!(parse_cpu_stats(output), (1000, 840));
        assert_eq!(parse_cpu_stats("intr 1 2 3 4 5"), (0, 0));
        assert_eq!(parse_cpu_stats(""), (0, 0));
    }

    #[test]
    fn test_parse_meminfo_prefers_available() {
        let output = "MemTotal: 8000000 kB\nMemFree: 1000 kB\nMemAvailable: 3000000 kB\n";
        assert_eq!(parse_meminfo(output), (8000000, 3000000));
    }

    #[test]
    fn test_parse_meminfo_fallback() {
        let output = "MemTotal: 1000 kB\nMemFree: 100 kB\nBuffers: 50 kB\nCached: 250 kB\n";
        assert_eq!(parse_meminfo(output), (1000, 400));
    }

    #[test]
    fn test_parse_net_dev_skips_loopback() {
        let output = "Inter-|   Receive |  Transmit\n \
            face |bytes packets errs drop fifo frame compressed multicast|bytes\n    \
            lo: 999 1 0 0 0 0 0 0 999 1 0 0 0 0 0 0\n  \
            wlan0: 1000 10 0 0 0 0 0 0 500 5 0 0 0 0 0 0\n \
            rmnet0:200 2 0 0 0 0 0 0 100 1 0 0 0 0 0 0\n";
        assert_eq!(parse_net_dev(output), (1200, 600));
    }

    #[test]
    fn test_cpu_percent() {
        let prev = SystemStats {
            cpu_total: 1000,
            cpu_idle: 800,
            ..Default::default()
        };
        let curr = SystemStats {
            cpu_total: 1100,
            cpu_idle: 875,
            ..Default::default()
        };
        assert!((cpu_percent(&prev, &curr) - 25.0).abs() < f64::EPSILON);
        assert_eq!(cpu_percent(&curr, &curr), 0.0);
    }

    #[test]
    fn test_rate_ignores_wrap() {
        assert_eq!(rate(100, 150), Some(50));
        assert_eq!(rate(150, 100), None);
    }

    #[tokio::test]
    async fn test_sample_stats_all_sources_failing() {
        let bridge = FakeBridge::new();
        tokio_test::assert_err!(sample_stats(&bridge, "abc").await);
    }

    #[tokio::test]
    async fn test_sample_stats_partial() {
        let bridge = FakeBridge::new().respond(
            &["-s", "abc", "shell", "cat", "/proc/meminfo"],
            "MemTotal: 1000 kB\nMemAvailable: 400 kB\n",
        );
        let stats = sample_stats(&bridge, "abc").await.unwrap();
        assert_eq!(stats.mem_used, 600);
        assert_eq!(stats.cpu_total, 0);
    }
}
