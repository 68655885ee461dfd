//! Input form dialog (wireless pairing)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::overlay::InputForm;

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 50;

pub struct FormDialog<'a> {
    form: &'a InputForm,
}

impl<'a> FormDialog<'a> {
    pub fn new(form: &'a InputForm) -> Self {
        Self { form }
    }

    fn field_line(&self, index: usize) -> Line<'a> {
        let field = &self.form.fields()[index];
        let focused = index == self.form.focus();

        let label_style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        let mut spans = vec![
            Span::styled(if focused { "> " } else { "  " }, styles::accent()),
            Span::styled(format!("{:<12}", field.label), label_style),
            Span::styled(field.value.as_str(), styles::text_primary()),
        ];
        if focused {
            spans.push(Span::styled("▌", styles::accent()));
        }
        Line::from(spans)
    }
}

impl Widget for FormDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fields = self.form.fields().len() as u16;
        // Borders, spacer, one row per field, spacer, hint
        let height = fields + 5;
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, height, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let title = format!(" {} ", self.form.title());
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let mut lines = vec![Line::default()];
        lines.extend((0..self.form.fields().len()).map(|i| self.field_line(i)));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("tab", styles::keybinding()),
            Span::styled(" next  ", styles::text_muted()),
            Span::styled("enter", styles::keybinding()),
            Span::styled(" submit  ", styles::text_muted()),
            Span::styled("esc", styles::keybinding()),
            Span::styled(" cancel", styles::text_muted()),
        ]));

        Paragraph::new(lines)
            .style(Style::default().bg(palette::POPUP_BG))
            .render(inner, buf);
    }
}
