//! Abstract input key event, independent of terminal library.
//!
//! Screens and overlays match on [`InputKey`] only; the TUI converts
//! crossterm events at its boundary so the engine never sees terminal types.

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Printable character this key would type into a text field
    pub fn typed_char(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }

    /// `up`/`k`
    pub fn is_up(&self) -> bool {
        matches!(self, InputKey::Up | InputKey::Char('k'))
    }

    /// `down`/`j`
    pub fn is_down(&self) -> bool {
        matches!(self, InputKey::Down | InputKey::Char('j'))
    }
}
