//! Screen layout definitions

use ratatui::layout::{Constraint, Layout, Rect};

/// Minimum terminal width for the full help bar
pub const MIN_FULL_HELP_WIDTH: u16 = 60;

/// Screen areas for the main layout
pub struct ScreenAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(5),    // Screen body
        Constraint::Length(1), // Help bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Split a screen body into a fixed status strip and the scrollable rest
pub fn split_status(body: Rect, status_lines: u16) -> (Rect, Rect) {
    let chunks =
        Layout::vertical([Constraint::Length(status_lines), Constraint::Min(1)]).split(body);
    (chunks[0], chunks[1])
}

/// Check if the help bar should drop its descriptions
pub fn use_compact_help(area: Rect) -> bool {
    area.width < MIN_FULL_HELP_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let areas = create(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.footer.height, 1);
        assert_eq!(areas.body.height, 20);
        assert_eq!(areas.footer.y, 23);
    }

    #[test]
    fn test_split_status() {
        let (status, rest) = split_status(Rect::new(0, 3, 80, 20), 2);
        assert_eq!(status.height, 2);
        assert_eq!(rest.y, 5);
        assert_eq!(rest.height, 18);
    }

    #[test]
    fn test_compact_help_threshold() {
        assert!(use_compact_help(Rect::new(0, 0, 40, 24)));
        assert!(!use_compact_help(Rect::new(0, 0, 80, 24)));
    }
}
