//! One body widget per screen.
//!
//! Each widget borrows the screen's state and the shared context; none of
//! them mutate anything. Overlays and the toast are drawn on top by
//! `render::view`.

mod apps;
mod dashboard;
mod device_info;
mod devices;
mod files;
mod logcat;
mod monitor;

pub use apps::AppsView;
pub use dashboard::DashboardView;
pub use device_info::DeviceInfoView;
pub use devices::DevicesView;
pub use files::FilesView;
pub use logcat::LogcatView;
pub use monitor::MonitorView;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

/// Body shown by device-bound screens when nothing is selected
pub struct NoDevice;

impl Widget for NoDevice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::default(),
            Line::styled("No device selected", styles::status_red()),
            Line::styled(
                "Press esc, then d to choose a device.",
                styles::text_muted(),
            ),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

/// `Key:  value` row with a fixed-width key column
pub(crate) fn key_value<'a>(key: &'a str, value: impl Into<Span<'a>>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", key), styles::text_muted()),
        value.into(),
    ])
}

/// Muted single-line placeholder ("Loading apps...")
pub(crate) fn placeholder(text: &str) -> Paragraph<'_> {
    Paragraph::new(Line::styled(text, styles::text_muted()))
}
