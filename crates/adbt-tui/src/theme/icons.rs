//! Icon set for the TUI.
//!
//! Provides `IconSet` which resolves icons at runtime based on `IconMode`.
//! - `IconMode::Unicode`: safe characters that work in all terminals
//! - `IconMode::NerdFonts`: rich Nerd Font glyphs (requires Nerd Font installed)

use adbt_app::config::IconMode;

/// Runtime icon resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn terminal(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f120}", // nf-fa-terminal
            IconMode::Unicode => "\u{276f}",   // ❯
        }
    }

    pub fn smartphone(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f3cd}", // nf-fa-mobile
            IconMode::Unicode => "[M]",
        }
    }

    pub fn folder(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f07b}", // nf-fa-folder
            IconMode::Unicode => "\u{25b8}",   // ▸
        }
    }

    pub fn file(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f15b}", // nf-fa-file
            IconMode::Unicode => " ",
        }
    }

    pub fn package(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f487}", // nf-oct-package
            IconMode::Unicode => "\u{2022}",   // •
        }
    }

    pub fn cpu(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f2db}", // nf-fa-microchip
            IconMode::Unicode => "[C]",
        }
    }

    pub fn activity(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f0f1}", // nf-fa-heartbeat
            IconMode::Unicode => "~",
        }
    }

    pub fn alert(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f071}", // nf-fa-warning
            IconMode::Unicode => "\u{26a0}",   // ⚠
        }
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f00c}", // nf-fa-check
            IconMode::Unicode => "\u{2713}",   // ✓
        }
    }

    pub fn chevron_right(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f054}", // nf-fa-chevron_right
            IconMode::Unicode => "\u{25b6}",   // ▶
        }
    }

    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f444}", // nf-oct-dot_fill
            IconMode::Unicode => "\u{25cf}",   // ●
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_icons_are_non_empty() {
        let icons = IconSet::new(IconMode::Unicode);
        assert!(!icons.terminal().is_empty());
        assert!(!icons.smartphone().is_empty());
        assert!(!icons.folder().is_empty());
        assert!(!icons.package().is_empty());
        assert!(!icons.cpu().is_empty());
        assert!(!icons.alert().is_empty());
    }

    #[test]
    fn test_nerd_font_icons_are_non_empty() {
        let icons = IconSet::new(IconMode::NerdFonts);
        assert!(!icons.terminal().is_empty());
        assert!(!icons.smartphone().is_empty());
        assert!(!icons.folder().is_empty());
        assert!(!icons.file().is_empty());
        assert!(!icons.activity().is_empty());
        assert!(!icons.check().is_empty());
    }

    #[test]
    fn test_unicode_and_nerd_font_differ() {
        let unicode = IconSet::new(IconMode::Unicode);
        let nerd = IconSet::new(IconMode::NerdFonts);
        assert_ne!(unicode.terminal(), nerd.terminal());
        assert_ne!(unicode.folder(), nerd.folder());
        assert_ne!(unicode.alert(), nerd.alert());
    }

    #[test]
    fn test_unicode_status_icons() {
        let icons = IconSet::new(IconMode::Unicode);
        assert_eq!(icons.dot(), "●");
        assert_eq!(icons.check(), "✓");
        assert_eq!(icons.chevron_right(), "▶");
    }
}
