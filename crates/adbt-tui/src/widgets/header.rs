//! Header bar widget
//!
//! Shows the app name, the active screen title, and the selected device.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use adbt_app::{Device, ScreenId};

use crate::theme::{icons::IconSet, palette, styles};

/// Main header: `❯ ADBT │ <screen title>` on the left, device pill on the right
pub struct MainHeader<'a> {
    screen: ScreenId,
    device: Option<&'a Device>,
    icons: IconSet,
}

impl<'a> MainHeader<'a> {
    pub fn new(screen: ScreenId, icons: IconSet) -> Self {
        Self {
            screen,
            device: None,
            icons,
        }
    }

    pub fn with_device(mut self, device: Option<&'a Device>) -> Self {
        self.device = device;
        self
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (dot_style, device_label) = match self.device {
            Some(device) => (styles::status_green(), device.display_name()),
            None => (styles::status_red(), "No device".to_string()),
        };

        let left_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.icons.terminal(), styles::accent()),
            Span::raw(" "),
            Span::styled(
                "ADBT",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", styles::text_muted()),
            Span::styled(self.screen.title(), styles::text_secondary()),
        ]);
        let left_width = left_line.width() as u16;

        let device_line = Line::from(vec![
            Span::styled(self.icons.dot(), dot_style),
            Span::raw(" "),
            Span::styled(device_label, styles::text_muted()),
            Span::raw(" "),
        ]);
        let device_width = device_line.width() as u16;

        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // Right-align the device pill when it fits beside the title
        if left_width + device_width + 2 <= inner.width {
            let device_x = inner.x + inner.width - device_width;
            buf.set_line(device_x, inner.y, &device_line, device_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_device, TestTerminal};
    use adbt_app::config::IconMode;

    fn icons() -> IconSet {
        IconSet::new(IconMode::Unicode)
    }

    #[test]
    fn test_header_renders_app_and_screen_title() {
        let mut term = TestTerminal::new();
        let header = MainHeader::new(ScreenId::Monitor, icons());

        term.render_widget(header, term.area());

        assert!(term.buffer_contains("ADBT │ Performance Monitor"));
    }

    #[test]
    fn test_header_without_device() {
        let mut term = TestTerminal::new();
        let header = MainHeader::new(ScreenId::Dashboard, icons());

        term.render_widget(header, term.area());

        assert!(term.buffer_contains("No device"));
    }

    #[test]
    fn test_header_shows_selected_device() {
        let mut term = TestTerminal::new();
        let device = test_device("emulator-5554", "Pixel 7");
        let header = MainHeader::new(ScreenId::Apps, icons()).with_device(Some(&device));

        term.render_widget(header, term.area());

        assert!(term.buffer_contains("Pixel 7 (emulator-5554)"));
        assert!(!term.buffer_contains("No device"));
    }

    #[test]
    fn test_header_narrow_terminal_drops_device_pill() {
        let mut term = TestTerminal::with_size(30, 3);
        let device = test_device("emulator-5554", "Pixel 7");
        let header = MainHeader::new(ScreenId::DeviceInfo, icons()).with_device(Some(&device));

        term.render_widget(header, term.area());

        assert!(term.buffer_contains("ADBT"));
        assert!(!term.buffer_contains("Pixel 7"));
    }
}
