//! Inline search prompt widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::overlay::SearchInput;

use crate::theme::styles;

/// `search: query▌` while typing, `search: query` once kept
pub struct SearchLine<'a> {
    search: &'a SearchInput,
}

impl<'a> SearchLine<'a> {
    pub fn new(search: &'a SearchInput) -> Self {
        Self { search }
    }

    /// Whether there is anything to show
    pub fn is_shown(search: &SearchInput) -> bool {
        search.is_active() || !search.query().is_empty()
    }
}

impl Widget for SearchLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !Self::is_shown(self.search) {
            return;
        }
        let mut spans = vec![
            Span::styled("search: ", styles::keybinding()),
            Span::styled(self.search.query(), styles::text_primary()),
        ];
        if self.search.is_active() {
            spans.push(Span::styled("▌", styles::accent()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
