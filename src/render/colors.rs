//! Color definitions shared by the status and log renderers.

use colored::{Color, ColoredString, Colorize};

/// Foreground and background color of a span. `None` keeps the terminal
/// default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    pub const PLAIN: Style = Style { fg: None, bg: None };

    pub const fn fg(color: Color) -> Self {
        Style {
            fg: Some(color),
            bg: None,
        }
    }

    pub const fn on(self, color: Color) -> Self {
        Style {
            fg: self.fg,
            bg: Some(color),
        }
    }

    /// Apply the style using the colored crate.
    pub fn apply(&self, s: &str) -> ColoredString {
        let mut out = s.normal();
        if let Some(fg) = self.fg {
            out = out.color(fg);
        }
        if let Some(bg) = self.bg {
            out = out.on_color(bg);
        }
        out
    }
}

// Style constants for consistent theming
pub mod theme {
    use colored::Color;

    use super::Style;

    pub const COMMIT: Style = Style::fg(Color::BrightCyan);
    pub const HEAD: Style = Style::fg(Color::BrightBlue);
    pub const UPSTREAM: Style = Style::fg(Color::Yellow);
    pub const AHEAD: Style = Style::fg(Color::Red);
    pub const BEHIND: Style = Style::fg(Color::Green);

    pub const STAGED: Style = Style::fg(Color::Green);
    pub const UNSTAGED: Style = Style::fg(Color::Red);
    pub const SUBMODULE: Style = Style::fg(Color::Blue);
    pub const PATH: Style = Style::fg(Color::White);
    pub const RENAME_ARROW: Style = Style::fg(Color::BrightMagenta);
    pub const UNTRACKED: Style = Style::fg(Color::Cyan);
    pub const IGNORED: Style = Style::fg(Color::Cyan);
    pub const IGNORED_PATH: Style = Style::fg(Color::Blue);

    pub const TIMESTAMP: Style = Style::fg(Color::Green).on(Color::Black);
    pub const GUTTER: Style = Style::PLAIN.on(Color::Black);
    pub const BOOT_TAG: Color = Color::Red;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_style_builders() {
        assert_eq!(
            theme::TIMESTAMP,
            Style {
                fg: Some(Color::Green),
                bg: Some(Color::Black)
            }
        );
        assert_eq!(theme::GUTTER.fg, None);
    }

    #[test]
    fn test_apply_always_colored() {
        colored::control::set_override(true);
        let styled = Style::fg(Color::Red).apply("x").to_string();
        assert!(styled.contains("\x1b["), "{styled:?}");
        assert!(styled.contains('x'));
        assert_eq!(Style::PLAIN.apply("x").to_string(), "x");
    }
}
