//! Device selection list

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use adbt_app::screens::DevicesScreen;
use adbt_app::{AppContext, Device};

use super::placeholder;
use crate::theme::{icons::IconSet, styles};
use crate::widgets::help_bar::Hints;

pub struct DevicesView<'a> {
    screen: &'a DevicesScreen,
    ctx: &'a AppContext,
    icons: IconSet,
}

impl<'a> DevicesView<'a> {
    pub const HINTS: Hints = &[
        ("↑/↓", "navigate"),
        ("enter", "select"),
        ("w", "wireless pair"),
        ("r", "refresh"),
        ("esc", "back"),
    ];

    pub fn new(screen: &'a DevicesScreen, ctx: &'a AppContext, icons: IconSet) -> Self {
        Self { screen, ctx, icons }
    }

    fn device_item(&self, device: &'a Device) -> ListItem<'a> {
        let selected = self
            .ctx
            .selected_device
            .as_ref()
            .is_some_and(|d| d.serial == device.serial);

        let detail = if device.is_connected() && !device.android_version.is_empty() {
            format!(" - Android {}", device.android_version)
        } else {
            format!(" - {}", device.state)
        };
        let mut spans = vec![
            Span::styled(self.icons.dot(), styles::device_state(&device.state)),
            Span::raw(" "),
            Span::styled(device.display_name(), styles::text_primary()),
            Span::styled(detail, styles::text_muted()),
        ];
        if selected {
            spans.push(Span::styled("  (selected)", styles::accent()));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Widget for DevicesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Connected Devices ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let (list_area, status_area) = (chunks[0], chunks[1]);

        if self.screen.loading && self.ctx.devices.is_empty() {
            placeholder("Loading devices...").render(list_area, buf);
        } else if self.ctx.devices.is_empty() {
            Paragraph::new(Line::styled(
                "No devices found. Please connect a device with USB debugging enabled.",
                styles::status_red(),
            ))
            .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = self
                .ctx
                .devices
                .iter()
                .map(|device| self.device_item(device))
                .collect();
            let list = List::new(items)
                .highlight_style(styles::focused_selected())
                .highlight_symbol("› ");
            let mut state = ListState::default().with_selected(Some(self.screen.cursor));
            StatefulWidget::render(list, list_area, buf, &mut state);
        }

        if self.screen.pairing {
            placeholder("Connecting to device…").render(status_area, buf);
        }
    }
}
