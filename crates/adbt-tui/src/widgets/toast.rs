//! Transient notification box

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use adbt_app::Toast;

use crate::theme::{icons::IconSet, palette, styles};

const MAX_WIDTH: u16 = 48;

/// Renders in the bottom-right corner of the area it is given
pub struct ToastView<'a> {
    toast: &'a Toast,
    icons: IconSet,
}

impl<'a> ToastView<'a> {
    pub fn new(toast: &'a Toast, icons: IconSet) -> Self {
        Self { toast, icons }
    }

    /// Box for the toast: text plus icon and borders, wrapped at `MAX_WIDTH`
    fn toast_rect(&self, area: Rect) -> Rect {
        let text_width = self.toast.text().width() as u16 + 6;
        let width = text_width.min(MAX_WIDTH).min(area.width);
        let inner_width = width.saturating_sub(4).max(1);
        let rows = (text_width.saturating_sub(6)).div_ceil(inner_width).max(1);
        let height = (rows + 2).min(area.height);
        Rect::new(
            area.x + area.width.saturating_sub(width),
            area.y + area.height.saturating_sub(height),
            width,
            height,
        )
    }
}

impl Widget for ToastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.toast.is_visible() || area.width < 8 || area.height < 3 {
            return;
        }
        let rect = self.toast_rect(area);
        Clear.render(rect, buf);

        let (icon, color) = if self.toast.is_error() {
            (self.icons.alert(), palette::STATUS_RED)
        } else {
            (self.icons.check(), palette::STATUS_GREEN)
        };
        let block = styles::glass_block(true)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(palette::CARD_BG));

        let line = Line::from(vec![
            Span::styled(icon, Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(self.toast.text(), styles::text_primary()),
        ]);
        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use adbt_app::config::IconMode;
    use std::time::Duration;

    #[test]
    fn test_visible_toast_renders_text() {
        let mut toast = Toast::default();
        toast.show("Launch successful", false, Duration::from_secs(2));

        let mut term = TestTerminal::new();
        term.render_widget(
            ToastView::new(&toast, IconSet::new(IconMode::Unicode)),
            term.area(),
        );

        assert!(term.buffer_contains("✓ Launch successful"));
    }

    #[test]
    fn test_error_toast_uses_alert_icon() {
        let mut toast = Toast::default();
        toast.show("Pull failed: no such file", true, Duration::from_secs(3));

        let mut term = TestTerminal::new();
        term.render_widget(
            ToastView::new(&toast, IconSet::new(IconMode::Unicode)),
            term.area(),
        );

        assert!(term.buffer_contains("⚠ Pull failed"));
    }

    #[test]
    fn test_hidden_toast_renders_nothing() {
        let toast = Toast::default();

        let mut term = TestTerminal::new();
        term.render_widget(
            ToastView::new(&toast, IconSet::new(IconMode::Unicode)),
            term.area(),
        );

        assert!(!term.buffer_contains("✓"));
    }

    #[test]
    fn test_toast_sits_in_bottom_right() {
        let mut toast = Toast::default();
        toast.show("ok", false, Duration::from_secs(2));
        let view = ToastView::new(&toast, IconSet::new(IconMode::Unicode));

        let rect = view.toast_rect(Rect::new(0, 0, 80, 24));
        assert_eq!(rect.x + rect.width, 80);
        assert_eq!(rect.y + rect.height, 24);
        assert_eq!(rect.height, 3);
    }
}
