//! Confirmation dialog widget for destructive actions

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::overlay::ConfirmPrompt;

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 50;

/// Confirmation dialog widget.
///
/// The prompt message may span several lines; the first is the question and
/// the rest name the target (package, file, action).
pub struct ConfirmDialog<'a> {
    prompt: &'a ConfirmPrompt,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(prompt: &'a ConfirmPrompt) -> Self {
        Self { prompt }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message_lines: Vec<&str> = self.prompt.message().lines().collect();
        let height = message_lines.len() as u16 + 6;
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, height, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let block = styles::modal_block(" Confirm ").title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),                         // Spacer
            Constraint::Length(message_lines.len() as u16), // Message
            Constraint::Length(1),                         // Spacer
            Constraint::Length(1),                         // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

        let message: Vec<Line> = message_lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == 0 {
                    Style::default().fg(palette::STATUS_YELLOW)
                } else {
                    Style::default()
                        .fg(palette::TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD)
                };
                Line::styled(*text, style)
            })
            .collect();
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let buttons = Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled(
                "y",
                Style::default()
                    .fg(palette::STATUS_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("] Yes  ", styles::text_muted()),
            Span::styled("[", styles::text_muted()),
            Span::styled(
                "n",
                Style::default()
                    .fg(palette::STATUS_RED)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("] No", styles::text_muted()),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    fn prompt(message: &str) -> ConfirmPrompt {
        let mut prompt = ConfirmPrompt::default();
        prompt.show(message);
        prompt
    }

    #[test]
    fn test_confirm_dialog_renders_every_message_line() {
        let mut term = TestTerminal::new();
        let prompt = prompt("Uninstall:\ncom.example.app");

        term.render_widget(ConfirmDialog::new(&prompt), term.area());

        assert!(term.buffer_contains("Uninstall:"));
        assert!(term.buffer_contains("com.example.app"));
    }

    #[test]
    fn test_confirm_dialog_shows_options() {
        let mut term = TestTerminal::new();
        let prompt = prompt("reboot?");

        term.render_widget(ConfirmDialog::new(&prompt), term.area());

        assert!(term.buffer_contains("Yes"));
        assert!(term.buffer_contains("No"));
        assert!(term.buffer_contains("Confirm"));
    }

    #[test]
    fn test_confirm_dialog_small_terminal() {
        let mut term = TestTerminal::with_size(30, 8);
        let prompt = prompt("Delete file:\nnotes.txt");

        // Clamped to the terminal without panicking
        term.render_widget(ConfirmDialog::new(&prompt), term.area());
    }
}
