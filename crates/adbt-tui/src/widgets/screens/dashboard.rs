//! Dashboard body: selected device summary and the quick-action menu

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::screens::{DashboardScreen, MENU};
use adbt_app::AppContext;

use super::{key_value, placeholder};
use crate::theme::{icons::IconSet, palette, styles};
use crate::widgets::help_bar::Hints;

pub struct DashboardView<'a> {
    screen: &'a DashboardScreen,
    ctx: &'a AppContext,
    icons: IconSet,
}

impl<'a> DashboardView<'a> {
    pub const HINTS: Hints = &[
        ("↑/↓", "navigate"),
        ("enter", "select"),
        ("r", "refresh"),
        ("q", "quit"),
    ];

    pub fn new(screen: &'a DashboardScreen, ctx: &'a AppContext, icons: IconSet) -> Self {
        Self { screen, ctx, icons }
    }

    fn device_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![Line::styled("Device", styles::accent_bold())];
        match &self.ctx.selected_device {
            Some(device) => {
                lines.push(key_value(
                    "Status:",
                    Span::styled(format!("{} Connected", self.icons.dot()), styles::status_green()),
                ));
                lines.push(key_value("Model:", device.model.as_str()));
                lines.push(key_value("Serial:", device.serial.as_str()));
                if !device.android_version.is_empty() {
                    lines.push(key_value("Android:", device.android_version.as_str()));
                }
            }
            None => {
                lines.push(Line::styled(
                    format!("{} No device connected", self.icons.dot()),
                    styles::status_red(),
                ));
                lines.push(Line::styled(
                    "Connect a device with USB debugging enabled.",
                    styles::text_muted(),
                ));
                lines.push(Line::styled(
                    "Press d to open the device manager.",
                    styles::text_muted(),
                ));
            }
        }
        lines
    }

    fn menu_lines(&self) -> Vec<Line<'a>> {
        let has_device = self.ctx.has_device();
        let mut lines = vec![Line::styled("Quick Actions", styles::accent_bold())];
        for (i, item) in MENU.iter().enumerate() {
            let selected = i == self.screen.cursor;
            let mut spans = vec![
                Span::raw(if selected { "› " } else { "  " }),
                Span::styled(format!("[{}] ", item.key), styles::keybinding()),
                Span::styled(
                    item.title(),
                    if selected {
                        styles::focused_selected()
                    } else {
                        styles::text_primary()
                    },
                ),
                Span::styled(format!(" - {}", item.description), styles::text_muted()),
            ];
            if item.target.requires_device() && !has_device {
                spans.push(Span::styled(
                    " (requires device)",
                    Style::default()
                        .fg(palette::STATUS_RED)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.screen.loading && self.ctx.devices.is_empty() {
            placeholder("Loading devices...").render(inner, buf);
            return;
        }

        let mut lines = self.device_lines();
        lines.push(Line::default());
        lines.extend(self.menu_lines());
        Paragraph::new(lines).render(inner, buf);
    }
}
