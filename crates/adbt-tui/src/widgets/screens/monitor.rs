//! Performance monitor: CPU and memory gauges, CPU history, network rates

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Sparkline, Widget},
};

use adbt_app::screens::MonitorScreen;
use adbt_core::format_bytes;

use crate::theme::{icons::IconSet, palette, styles};
use crate::widgets::help_bar::Hints;

const LABEL_WIDTH: u16 = 12;

pub struct MonitorView<'a> {
    screen: &'a MonitorScreen,
    icons: IconSet,
}

impl<'a> MonitorView<'a> {
    pub const HINTS: Hints = &[("esc", "back"), ("q", "quit")];

    pub fn new(screen: &'a MonitorScreen, icons: IconSet) -> Self {
        Self { screen, icons }
    }

    fn labelled_row(area: Rect) -> (Rect, Rect) {
        let chunks =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)]).split(area);
        (chunks[0], chunks[1])
    }

    fn rate_label(rate: Option<u64>) -> String {
        match rate {
            Some(bytes) => format!("{}/s", format_bytes(bytes)),
            None => "-".to_string(),
        }
    }
}

impl Widget for MonitorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // CPU gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Memory gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Network
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // CPU history
            Constraint::Length(1), // Sample time
        ])
        .split(inner);

        if self.screen.last.is_none() {
            Paragraph::new(Line::styled("Sampling...", styles::text_muted())).render(rows[1], buf);
            return;
        }

        // CPU needs two samples; the first shows an empty gauge
        let cpu = self.screen.cpu.unwrap_or(0.0).clamp(0.0, 100.0);
        let (label, gauge) = Self::labelled_row(rows[1]);
        Line::styled(format!("{} CPU Use", self.icons.cpu()), styles::text_muted())
            .render(label, buf);
        Gauge::default()
            .gauge_style(Style::default().fg(palette::GAUGE_CPU).bg(palette::CARD_BG))
            .ratio(cpu / 100.0)
            .label(format!("{:.1}%", cpu))
            .render(gauge, buf);

        let mem = self.screen.memory_ratio();
        let (label, gauge) = Self::labelled_row(rows[3]);
        Line::styled("Memory", styles::text_muted()).render(label, buf);
        Gauge::default()
            .gauge_style(Style::default().fg(palette::GAUGE_MEM).bg(palette::CARD_BG))
            .ratio(mem)
            .label(format!(
                "{:.1}% ({})",
                mem * 100.0,
                self.screen.memory_label().unwrap_or_default()
            ))
            .render(gauge, buf);

        let (label, value) = Self::labelled_row(rows[5]);
        Line::styled("Network", styles::text_muted()).render(label, buf);
        Line::from(vec![
            Span::styled("↓ ", styles::status_green()),
            Span::styled(Self::rate_label(self.screen.rx_rate), styles::text_primary()),
            Span::raw("   "),
            Span::styled("↑ ", styles::accent()),
            Span::styled(Self::rate_label(self.screen.tx_rate), styles::text_primary()),
        ])
        .render(value, buf);

        let history: Vec<u64> = self.screen.cpu_history.iter().copied().collect();
        Sparkline::default()
            .block(
                styles::glass_block(false)
                    .title(format!(" {} CPU history ", self.icons.activity())),
            )
            .data(history)
            .max(100)
            .style(Style::default().fg(palette::GAUGE_CPU))
            .render(rows[7], buf);

        if let Some(at) = self.screen.sampled_at {
            Line::styled(
                format!("sampled {}", at.format("%H:%M:%S")),
                styles::text_muted(),
            )
            .render(rows[8], buf);
        }
    }
}
