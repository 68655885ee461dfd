//! Key hint bar at the bottom of every screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::layout;
use crate::theme::styles;

/// `(key, description)` pairs
pub type Hints = &'static [(&'static str, &'static str)];

pub struct HelpBar {
    hints: Hints,
    /// Appended after the hints, e.g. scroll position
    suffix: Option<String>,
}

impl HelpBar {
    pub fn new(hints: Hints) -> Self {
        Self {
            hints,
            suffix: None,
        }
    }

    pub fn suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix;
        self
    }
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let compact = layout::use_compact_help(area);
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, description)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(if compact { " " } else { "  " }));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            if !compact {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(*description, styles::text_muted()));
            }
        }
        if let Some(suffix) = self.suffix {
            spans.push(Span::styled(" │ ", styles::text_muted()));
            spans.push(Span::styled(suffix, styles::text_muted()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
