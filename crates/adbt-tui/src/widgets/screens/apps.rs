//! Installed application list with filter and search

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use adbt_app::screens::{AppFilter, AppsScreen};

use super::placeholder;
use crate::theme::{icons::IconSet, styles};
use crate::widgets::help_bar::Hints;
use crate::widgets::SearchLine;

const FILTERS: [AppFilter; 3] = [AppFilter::All, AppFilter::User, AppFilter::System];

pub struct AppsView<'a> {
    screen: &'a AppsScreen,
    icons: IconSet,
}

impl<'a> AppsView<'a> {
    pub const HINTS: Hints = &[
        ("↑/↓", "navigate"),
        ("enter", "launch"),
        ("s", "stop"),
        ("u", "uninstall"),
        ("x", "clear"),
        ("f", "filter"),
        ("/", "search"),
        ("r", "reload"),
        ("esc", "back"),
    ];

    pub const SEARCH_HINTS: Hints = &[("enter", "apply"), ("esc", "cancel")];

    pub fn new(screen: &'a AppsScreen, icons: IconSet) -> Self {
        Self { screen, icons }
    }

    pub fn hints(screen: &AppsScreen) -> Hints {
        if screen.search.is_active() {
            Self::SEARCH_HINTS
        } else {
            Self::HINTS
        }
    }

    fn filter_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        for (i, filter) in FILTERS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" / ", styles::text_muted()));
            }
            let style = if *filter == self.screen.filter {
                styles::keybinding()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(filter.label(), style));
        }
        Line::from(spans)
    }
}

impl Widget for AppsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Installed Applications ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Filter tabs
            Constraint::Length(1), // Search prompt
            Constraint::Min(1),    // Package list
        ])
        .split(inner);

        self.filter_line().render(chunks[0], buf);
        SearchLine::new(&self.screen.search).render(chunks[1], buf);

        if self.screen.loading {
            placeholder("Loading apps...").render(chunks[2], buf);
            return;
        }

        let visible = self.screen.visible_apps();
        if visible.is_empty() {
            placeholder("No apps found").render(chunks[2], buf);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|app| {
                let tag = if app.is_system { "[S]" } else { "[U]" };
                ListItem::new(Line::from(vec![
                    Span::styled(self.icons.package(), styles::accent()),
                    Span::raw(" "),
                    Span::styled(tag, styles::text_muted()),
                    Span::raw(" "),
                    Span::styled(app.package.as_str(), styles::text_primary()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(styles::focused_selected())
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.screen.cursor));
        StatefulWidget::render(list, chunks[2], buf, &mut state);
    }
}
