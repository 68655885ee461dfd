//! Live log viewer

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use adbt_app::screens::LogcatScreen;
use adbt_app::ScrollState;
use adbt_core::LogPriority;

use crate::layout;
use crate::theme::styles;
use crate::widgets::help_bar::Hints;
use crate::widgets::SearchLine;

pub struct LogcatView<'a> {
    screen: &'a LogcatScreen,
    scroll: ScrollState,
}

impl<'a> LogcatView<'a> {
    pub const HINTS: Hints = &[
        ("c", "clear"),
        ("s", "start/stop"),
        ("f", "filter"),
        ("/", "search"),
        ("↑/↓", "scroll"),
        ("esc", "back"),
    ];

    pub const SEARCH_HINTS: Hints = &[("enter", "apply"), ("esc", "cancel")];

    /// `scroll` is the logcat entry of the viewport registry
    pub fn new(screen: &'a LogcatScreen, scroll: ScrollState) -> Self {
        Self { screen, scroll }
    }

    pub fn hints(screen: &LogcatScreen) -> Hints {
        if screen.search.is_active() {
            Self::SEARCH_HINTS
        } else {
            Self::HINTS
        }
    }

    /// Help bar suffix: percentage scrolled once the lines overflow the window
    pub fn scroll_percent(
        screen: &LogcatScreen,
        scroll: ScrollState,
        height: usize,
    ) -> Option<String> {
        let total = screen.visible_lines().len();
        if total <= height || height == 0 {
            return None;
        }
        let max = total - height;
        let offset = scroll.effective_offset(total, height);
        Some(format!("{}%", offset * 100 / max))
    }

    /// Height of the line window inside a body `area`
    pub fn window_height(area: Rect) -> usize {
        // Borders plus the status strip
        area.height.saturating_sub(3) as usize
    }

    fn status_line(&self) -> Line<'static> {
        let (icon, label, style) = styles::stream_indicator(self.screen.session.state());
        let mut spans = vec![
            Span::styled(format!("{} {}", icon, label), style),
            Span::raw("  "),
        ];

        let current = self.screen.min_level;
        let levels = std::iter::once(None).chain(LogPriority::ALL.into_iter().map(Some));
        for (i, level) in levels.enumerate() {
            if i > 0 {
                spans.push(Span::styled(" / ", styles::text_muted()));
            }
            let name = level.map_or("All", |p| p.letter());
            let chip_style = if level == current {
                styles::keybinding()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(name, chip_style));
        }

        spans.push(Span::styled(
            format!("  {}/{}", self.screen.buffer.len(), self.screen.buffer.capacity()),
            styles::text_muted(),
        ));
        Line::from(spans)
    }
}

impl Widget for LogcatView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        // Stream state and level chips above the lines
        let (status_area, lines_area) = layout::split_status(inner, 1);

        // The search prompt shares the status row once something is typed
        let status_chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(30)])
            .split(status_area);
        self.status_line().render(status_chunks[0], buf);
        SearchLine::new(&self.screen.search).render(status_chunks[1], buf);

        let lines = self.screen.visible_lines();
        let height = lines_area.height as usize;
        let range = self.scroll.visible_range(lines.len(), height);
        let rows: Vec<Line> = lines[range]
            .iter()
            .map(|line| Line::styled(line.text.as_str(), styles::log_priority(line.priority)))
            .collect();
        Paragraph::new(rows).render(lines_area, buf);
    }
}
