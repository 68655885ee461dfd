//! Semantic style builders.

use adbt_app::screens::StreamState;
use adbt_core::{DeviceState, LogPriority};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for the cursor row in every list
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Indicator mapping ---

/// Streaming indicator for the logcat status line.
///
/// Returns `(icon_char, label, Style)` for the given stream state.
pub fn stream_indicator(state: StreamState) -> (&'static str, &'static str, Style) {
    let style = match state {
        StreamState::Streaming => Style::default()
            .fg(palette::STATUS_GREEN)
            .add_modifier(Modifier::BOLD),
        StreamState::Starting => Style::default().fg(palette::STATUS_YELLOW),
        StreamState::Paused => Style::default()
            .fg(palette::STATUS_YELLOW)
            .add_modifier(Modifier::BOLD),
        StreamState::Errored => Style::default().fg(palette::STATUS_RED),
        StreamState::Idle | StreamState::Stopped => Style::default().fg(palette::TEXT_MUTED),
    };
    let icon = match state {
        StreamState::Streaming | StreamState::Paused => "●",
        StreamState::Errored => "✗",
        _ => "○",
    };
    (icon, state.label(), style)
}

/// Color for a device row by connection state
pub fn device_state(state: &DeviceState) -> Style {
    match state {
        DeviceState::Device => status_green(),
        DeviceState::Unauthorized => status_yellow(),
        _ => status_red(),
    }
}

/// Color for a logcat line by its parsed priority
pub fn log_priority(priority: Option<LogPriority>) -> Style {
    let color = match priority {
        Some(LogPriority::Fatal) => palette::LOG_FATAL,
        Some(LogPriority::Error) => palette::LOG_ERROR,
        Some(LogPriority::Warn) => palette::LOG_WARNING,
        Some(LogPriority::Info) => palette::LOG_INFO,
        Some(LogPriority::Debug) => palette::LOG_DEBUG,
        Some(LogPriority::Verbose) => palette::LOG_VERBOSE,
        None => palette::TEXT_SECONDARY,
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_border_styles_have_correct_colors() {
        assert_eq!(border_inactive().fg, Some(palette::BORDER_DIM));
        assert_eq!(border_active().fg, Some(palette::BORDER_ACTIVE));
    }

    #[test]
    fn test_accent_bold_has_modifier() {
        let style = accent_bold();
        assert_eq!(style.fg, Some(palette::ACCENT));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_focused_selected_uses_black_on_cyan() {
        let style = focused_selected();
        assert_eq!(style.fg, Some(palette::CONTRAST_FG));
        assert_eq!(style.bg, Some(palette::ACCENT));
    }

    #[test]
    fn test_stream_indicator_streaming() {
        let (icon, label, style) = stream_indicator(StreamState::Streaming);
        assert_eq!(icon, "●");
        assert_eq!(label, "streaming");
        assert_eq!(style.fg, Some(palette::STATUS_GREEN));
    }

    #[test]
    fn test_stream_indicator_paused() {
        let (icon, label, style) = stream_indicator(StreamState::Paused);
        assert_eq!(icon, "●");
        assert_eq!(label, "paused");
        assert_eq!(style.fg, Some(palette::STATUS_YELLOW));
    }

    #[test]
    fn test_stream_indicator_errored() {
        let (icon, label, style) = stream_indicator(StreamState::Errored);
        assert_eq!(icon, "✗");
        assert_eq!(label, "error");
        assert_eq!(style.fg, Some(palette::STATUS_RED));
    }

    #[test]
    fn test_device_state_colors() {
        assert_eq!(device_state(&DeviceState::Device).fg, Some(palette::STATUS_GREEN));
        assert_eq!(
            device_state(&DeviceState::Unauthorized).fg,
            Some(palette::STATUS_YELLOW)
        );
        assert_eq!(device_state(&DeviceState::Offline).fg, Some(palette::STATUS_RED));
    }

    #[test]
    fn test_unparsed_log_line_is_secondary() {
        assert_eq!(log_priority(None).fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(
            log_priority(Some(LogPriority::Error)).fg,
            Some(palette::LOG_ERROR)
        );
    }
}
