//! Performance monitor: periodic `/proc` samples turned into rates

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use adbt_bridge::{cpu_percent, rate, SystemStats};
use adbt_core::format_bytes;
use adbt_core::prelude::*;

use crate::command::Command;
use crate::handler::UpdateResult;
use crate::input_key::InputKey;
use crate::message::Completion;
use crate::state::{AppContext, ScreenId};
use crate::toast::Toast;

use super::ScreenController;

/// CPU samples kept for the history chart
pub const CPU_HISTORY: usize = 60;

#[derive(Debug, Default)]
pub struct MonitorScreen {
    pub last: Option<SystemStats>,
    pub sampled_at: Option<DateTime<Local>>,
    /// Needs two samples
    pub cpu: Option<f64>,
    pub cpu_history: VecDeque<u64>,
    /// Bytes per second
    pub rx_rate: Option<u64>,
    pub tx_rate: Option<u64>,
    /// A `SampleStats` is outstanding; ticks skip sampling until it lands
    pub sampling: bool,
    pub toast: Toast,
}

impl MonitorScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Used fraction of memory, 0.0 before the first sample
    pub fn memory_ratio(&self) -> f64 {
        match self.last {
            Some(stats) if stats.mem_total > 0 => {
                (stats.mem_used as f64 / stats.mem_total as f64).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// "used / total"
    pub fn memory_label(&self) -> Option<String> {
        let stats = self.last?;
        Some(format!(
            "{} / {}",
            format_bytes(stats.mem_used * 1024),
            format_bytes(stats.mem_total * 1024)
        ))
    }

    fn sample(&mut self, ctx: &AppContext) -> Option<Command> {
        if self.sampling {
            return None;
        }
        let serial = ctx.serial()?.to_string();
        self.sampling = true;
        Some(Command::SampleStats { serial })
    }

    fn schedule(&self, ctx: &AppContext) -> Option<Command> {
        ctx.has_device().then(|| Command::After {
            delay: ctx.settings.monitor.interval(),
            event: Completion::MonitorTick,
        })
    }

    fn record(&mut self, ctx: &AppContext, stats: SystemStats, at: DateTime<Local>) {
        if let Some(prev) = self.last {
            let cpu = cpu_percent(&prev, &stats);
            self.cpu = Some(cpu);
            self.cpu_history.push_back(cpu.round() as u64);
            while self.cpu_history.len() > CPU_HISTORY {
                self.cpu_history.pop_front();
            }

            // Rates use the real gap between samples, a slow bridge stretches it
            let elapsed_ms = self
                .sampled_at
                .map(|prev_at| (at - prev_at).num_milliseconds())
                .filter(|ms| *ms > 0)
                .map(|ms| ms as u64)
                .unwrap_or_else(|| ctx.settings.monitor.interval().as_millis().max(1) as u64);
            let per_second = |delta: u64| delta.saturating_mul(1000) / elapsed_ms;
            // A counter that went backwards keeps the previous rate
            if let Some(delta) = rate(prev.net_rx_bytes, stats.net_rx_bytes) {
                self.rx_rate = Some(per_second(delta));
            }
            if let Some(delta) = rate(prev.net_tx_bytes, stats.net_tx_bytes) {
                self.tx_rate = Some(per_second(delta));
            }
        }
        self.last = Some(stats);
        self.sampled_at = Some(at);
    }
}

impl ScreenController for MonitorScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Monitor
    }

    fn init(&mut self, ctx: &mut AppContext) -> Option<Command> {
        Command::batch([self.sample(ctx), self.schedule(ctx)])
    }

    fn handle_key(&mut self, _ctx: &mut AppContext, _key: InputKey) -> Option<UpdateResult> {
        None
    }

    fn handle_completion(&mut self, ctx: &mut AppContext, event: Completion) -> UpdateResult {
        match event {
            Completion::MonitorTick => {
                UpdateResult::maybe(Command::batch([self.sample(ctx), self.schedule(ctx)]))
            }
            Completion::StatsSampled { at, result } => {
                self.sampling = false;
                match result {
                    Ok(stats) => self.record(ctx, stats, at),
                    Err(e) => debug!("Skipping failed stats sample: {}", e),
                }
                UpdateResult::none()
            }
            _ => UpdateResult::none(),
        }
    }

    fn toast(&self) -> &Toast {
        &self.toast
    }

    fn toast_mut(&mut self) -> &mut Toast {
        &mut self.toast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbt_bridge::test_utils::test_device;

    fn stats(cpu_total: u64, cpu_idle: u64, rx: u64, tx: u64) -> SystemStats {
        SystemStats {
            cpu_total,
            cpu_idle,
            mem_total: 4_000_000,
            mem_used: 1_000_000,
            mem_available: 3_000_000,
            net_rx_bytes: rx,
            net_tx_bytes: tx,
        }
    }

    fn at(secs: i64) -> DateTime<Local> {
        let base = DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .with_timezone(&Local);
        base + chrono::Duration::seconds(secs)
    }

    fn sampled(screen: &mut MonitorScreen, ctx: &mut AppContext, secs: i64, s: SystemStats) {
        screen.handle_completion(
            ctx,
            Completion::StatsSampled {
                at: at(secs),
                result: Ok(s),
            },
        );
    }

    fn context() -> AppContext {
        let mut ctx = AppContext::default();
        ctx.select_device(test_device("abc", "Pixel"));
        ctx
    }

    #[test]
    fn test_init_samples_and_schedules() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        let leaves = screen.init(&mut ctx).unwrap().into_leaves();
        assert!(leaves
            .iter()
            .any(|c| matches!(c, Command::SampleStats { .. })));
        assert!(leaves.iter().any(|c| matches!(
            c,
            Command::After {
                event: Completion::MonitorTick,
                ..
            }
        )));
    }

    #[test]
    fn test_tick_rearms() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        let result = screen.handle_completion(&mut ctx, Completion::MonitorTick);
        assert_eq!(result.command.unwrap().into_leaves().len(), 2);
        assert!(screen.sampling);
    }

    #[test]
    fn test_tick_skips_sample_while_one_is_outstanding() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        screen.init(&mut ctx);

        let leaves = screen
            .handle_completion(&mut ctx, Completion::MonitorTick)
            .command
            .unwrap()
            .into_leaves();
        assert_eq!(leaves.len(), 1);
        assert!(matches!(
            leaves[0],
            Command::After {
                event: Completion::MonitorTick,
                ..
            }
        ));

        sampled(&mut screen, &mut ctx, 0, stats(1000, 800, 0, 0));
        assert!(!screen.sampling);
        let leaves = screen
            .handle_completion(&mut ctx, Completion::MonitorTick)
            .command
            .unwrap()
            .into_leaves();
        assert!(leaves
            .iter()
            .any(|c| matches!(c, Command::SampleStats { .. })));
    }

    #[test]
    fn test_rates_follow_sample_timestamps() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        sampled(&mut screen, &mut ctx, 0, stats(1000, 800, 10_000, 0));
        // Four seconds apart regardless of the configured interval
        sampled(&mut screen, &mut ctx, 4, stats(1100, 850, 30_000, 4_000));
        assert_eq!(screen.rx_rate, Some(5_000));
        assert_eq!(screen.tx_rate, Some(1_000));
    }

    #[test]
    fn test_failed_sample_clears_outstanding() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        screen.init(&mut ctx);
        screen.handle_completion(
            &mut ctx,
            Completion::StatsSampled {
                at: at(0),
                result: Err("timeout".into()),
            },
        );
        assert!(!screen.sampling);
    }

    #[test]
    fn test_no_device_issues_nothing() {
        let mut ctx = AppContext::default();
        let mut screen = MonitorScreen::new();
        assert!(screen.init(&mut ctx).is_none());
        assert!(screen
            .handle_completion(&mut ctx, Completion::MonitorTick)
            .command
            .is_none());
    }

    #[test]
    fn test_rates_from_two_samples() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();

        sampled(&mut screen, &mut ctx, 0, stats(1000, 800, 10_000, 5_000));
        assert!(screen.cpu.is_none());
        assert!(screen.rx_rate.is_none());

        sampled(&mut screen, &mut ctx, 1, stats(1100, 850, 30_000, 6_000));
        assert_eq!(screen.cpu, Some(50.0));
        assert_eq!(screen.rx_rate, Some(20_000));
        assert_eq!(screen.tx_rate, Some(1_000));
        assert_eq!(screen.cpu_history.len(), 1);
    }

    #[test]
    fn test_counter_wrap_keeps_previous_rate() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        sampled(&mut screen, &mut ctx, 0, stats(1000, 800, 10_000, 5_000));
        sampled(&mut screen, &mut ctx, 1, stats(1100, 850, 12_000, 6_000));
        sampled(&mut screen, &mut ctx, 2, stats(1200, 900, 100, 7_000));
        assert_eq!(screen.rx_rate, Some(2_000));
        assert_eq!(screen.tx_rate, Some(1_000));
    }

    #[test]
    fn test_failed_sample_skipped() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        sampled(&mut screen, &mut ctx, 0, stats(1000, 800, 0, 0));
        let result = screen.handle_completion(
            &mut ctx,
            Completion::StatsSampled {
                at: at(1),
                result: Err("permission denied".into()),
            },
        );
        assert!(result.command.is_none());
        assert!(!screen.toast.is_visible());
        assert_eq!(screen.last.unwrap().cpu_total, 1000);
    }

    #[test]
    fn test_memory_label() {
        let mut ctx = context();
        let mut screen = MonitorScreen::new();
        assert!(screen.memory_label().is_none());
        sampled(&mut screen, &mut ctx, 0, stats(1, 1, 0, 0));
        assert!(screen.memory_label().unwrap().contains(" / "));
        assert!((screen.memory_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
