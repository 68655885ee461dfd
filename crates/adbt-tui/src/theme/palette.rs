//! Color palette.
//!
//! Named terminal colors only, so the UI follows the user's terminal theme.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::DarkGray;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Effects ---
pub const SHADOW: Color = Color::Black;

// --- Log priority colors ---
pub const LOG_FATAL: Color = Color::LightRed;
pub const LOG_ERROR: Color = Color::Red;
pub const LOG_WARNING: Color = Color::Yellow;
pub const LOG_INFO: Color = Color::Green;
pub const LOG_DEBUG: Color = Color::Blue;
pub const LOG_VERBOSE: Color = Color::DarkGray;

// --- Gauges ---
pub const GAUGE_CPU: Color = Color::Green;
pub const GAUGE_MEM: Color = Color::Magenta;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_colors_differ() {
        assert_ne!(BORDER_ACTIVE, BORDER_DIM);
        assert_ne!(CONTRAST_FG, ACCENT);
    }

    #[test]
    fn test_error_and_success_are_distinct() {
        assert_ne!(STATUS_GREEN, STATUS_RED);
        assert_ne!(LOG_ERROR, LOG_INFO);
    }
}
