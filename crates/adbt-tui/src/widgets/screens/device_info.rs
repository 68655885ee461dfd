//! Device details and controls

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::screens::DeviceInfoScreen;
use adbt_app::Device;
use adbt_bridge::{DeviceAction, DeviceDetails};

use super::key_value;
use crate::theme::styles;
use crate::widgets::help_bar::Hints;

pub struct DeviceInfoView<'a> {
    screen: &'a DeviceInfoScreen,
    device: &'a Device,
}

impl<'a> DeviceInfoView<'a> {
    pub const HINTS: Hints = &[
        ("↑/↓", "navigate"),
        ("enter", "select"),
        ("c/w/s/r/R/b", "actions"),
        ("esc", "back"),
    ];

    pub fn new(screen: &'a DeviceInfoScreen, device: &'a Device) -> Self {
        Self { screen, device }
    }

    fn value(text: &str) -> Span<'static> {
        if text.is_empty() {
            Span::styled("-", styles::text_muted())
        } else {
            Span::styled(text.to_string(), styles::text_primary())
        }
    }

    fn device_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::styled("Device", styles::accent_bold()),
            key_value("Model:", Self::value(&self.device.model)),
            key_value("Android:", Self::value(&self.device.android_version)),
            key_value("Serial:", Self::value(&self.device.serial)),
            key_value("State:", Self::value(self.device.state.as_str())),
        ]
    }

    fn detail_lines(details: &DeviceDetails) -> Vec<Line<'static>> {
        let mut battery = details.battery_level.clone();
        if !battery.is_empty() && !details.battery_status.is_empty() {
            battery = format!("{} ({})", battery, details.battery_status);
        }
        let storage = if details.storage_used.is_empty() || details.storage_total.is_empty() {
            String::new()
        } else {
            format!("{} / {}", details.storage_used, details.storage_total)
        };
        let mut screen = details.screen_size.clone();
        if !screen.is_empty() && !details.screen_density.is_empty() {
            screen = format!("{} @ {}dpi", screen, details.screen_density);
        }

        vec![
            key_value("Battery:", Self::value(&battery)),
            key_value("Storage:", Self::value(&storage)),
            key_value("Screen:", Self::value(&screen)),
            key_value("IP:", Self::value(&details.ip_address)),
        ]
    }

    fn action_lines(&self) -> Vec<Line<'static>> {
        DeviceAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let selected = i == self.screen.cursor;
                let mut spans = vec![
                    Span::raw(if selected { "› " } else { "  " }),
                    Span::styled(format!("[{}] ", action.key()), styles::keybinding()),
                    Span::styled(
                        action.title(),
                        if selected {
                            styles::focused_selected()
                        } else {
                            styles::text_primary()
                        },
                    ),
                ];
                if action.is_destructive() {
                    spans.push(Span::styled(" !", styles::status_red()));
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl Widget for DeviceInfoView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        // Device and details side by side, actions underneath
        let rows = Layout::vertical([Constraint::Length(6), Constraint::Min(1)]).split(inner);
        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);

        Paragraph::new(self.device_lines()).render(columns[0], buf);

        let mut details = vec![Line::styled("Details", styles::accent_bold())];
        match &self.screen.details {
            Some(d) => details.extend(Self::detail_lines(d)),
            None => details.push(Line::styled("Loading details...", styles::text_muted())),
        }
        Paragraph::new(details).render(columns[1], buf);

        let mut actions = vec![Line::styled("Actions", styles::accent_bold())];
        actions.extend(self.action_lines());
        Paragraph::new(actions).render(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_device, TestTerminal};

    fn render(screen: &DeviceInfoScreen) -> TestTerminal {
        let device = test_device("emulator-5554", "Pixel 7");
        let mut term = TestTerminal::new();
        term.render_widget(DeviceInfoView::new(screen, &device), term.area());
        term
    }

    #[test]
    fn test_device_column_and_loading_details() {
        let term = render(&DeviceInfoScreen::new());

        assert!(term.buffer_contains("Pixel 7"));
        assert!(term.buffer_contains("emulator-5554"));
        assert!(term.buffer_contains("Loading details..."));
    }

    #[test]
    fn test_details_are_combined() {
        let mut screen = DeviceInfoScreen::new();
        screen.details = Some(DeviceDetails {
            battery_level: "87%".to_string(),
            battery_status: "Charging".to_string(),
            storage_used: "20.1 GB".to_string(),
            storage_total: "64.0 GB".to_string(),
            screen_size: "1080x2400".to_string(),
            screen_density: "420".to_string(),
            ip_address: String::new(),
        });

        let term = render(&screen);

        assert!(term.buffer_contains("87% (Charging)"));
        assert!(term.buffer_contains("20.1 GB / 64.0 GB"));
        assert!(term.buffer_contains("1080x2400 @ 420dpi"));
        assert!(!term.buffer_contains("Loading details..."));
    }

    #[test]
    fn test_action_list_marks_reboots() {
        let mut screen = DeviceInfoScreen::new();
        screen.cursor = 1;

        let term = render(&screen);

        assert!(term.buffer_contains("› [w] Toggle Wi-Fi"));
        assert!(term.buffer_contains("[b] Reboot to bootloader !"));
        assert!(term.buffer_contains("[c] Mirror screen (scrcpy)"));
    }
}
