//! Remote file browser

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use adbt_app::screens::FilesScreen;
use adbt_bridge::FileEntry;
use adbt_core::format_file_size;

use super::placeholder;
use crate::theme::{icons::IconSet, styles};
use crate::widgets::help_bar::Hints;

pub struct FilesView<'a> {
    screen: &'a FilesScreen,
    icons: IconSet,
}

impl<'a> FilesView<'a> {
    pub const HINTS: Hints = &[
        ("enter", "open"),
        ("backspace", "up"),
        ("p", "pull"),
        ("d", "delete"),
        ("r", "refresh"),
        ("esc", "back"),
    ];

    pub fn new(screen: &'a FilesScreen, icons: IconSet) -> Self {
        Self { screen, icons }
    }

    fn entry_item(&self, entry: &'a FileEntry) -> ListItem<'a> {
        let (icon, name_style) = if entry.is_dir {
            (self.icons.folder(), styles::accent())
        } else {
            (self.icons.file(), styles::text_primary())
        };
        let mut spans = vec![
            Span::styled(icon, styles::accent()),
            Span::raw(" "),
            Span::styled(entry.name.as_str(), name_style),
        ];
        if !entry.is_dir && !entry.size.is_empty() {
            spans.push(Span::styled(
                format!("  {}", format_file_size(&entry.size)),
                styles::text_muted(),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl Widget for FilesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Path
            Constraint::Length(1), // Permissions of the entry under the cursor
            Constraint::Min(1),    // Listing
        ])
        .split(inner);

        Line::from(vec![
            Span::styled("Path: ", styles::text_muted()),
            Span::styled(self.screen.path.as_str(), styles::text_secondary()),
        ])
        .render(chunks[0], buf);

        if let Some(entry) = self.screen.selected_entry() {
            if !entry.permissions.is_empty() {
                Line::styled(format!("  {}", entry.permissions), styles::text_muted())
                    .render(chunks[1], buf);
            }
        }

        if self.screen.loading {
            placeholder("Loading...").render(chunks[2], buf);
            return;
        }
        if self.screen.entries.is_empty() {
            placeholder("Empty directory").render(chunks[2], buf);
            return;
        }

        let items: Vec<ListItem> = self
            .screen
            .entries
            .iter()
            .map(|entry| self.entry_item(entry))
            .collect();
        let list = List::new(items)
            .highlight_style(styles::focused_selected())
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.screen.cursor));
        StatefulWidget::render(list, chunks[2], buf, &mut state);
    }
}
