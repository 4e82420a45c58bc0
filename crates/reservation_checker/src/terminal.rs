//! Terminal color handling for the text report.

use std::io::IsTerminal;

/// ANSI escape codes used by the report.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Green for available sites.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for negative outcomes and errors.
    pub const RED: &str = "\x1b[31m";
    /// Yellow for campground links.
    pub const YELLOW: &str = "\x1b[33m";
    /// Blue for the completion line.
    pub const BLUE: &str = "\x1b[34m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
}

impl ColorPalette {
    /// Palette with actual ANSI color codes.
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            green: colors::GREEN,
            red: colors::RED,
            yellow: colors::YELLOW,
            blue: colors::BLUE,
        }
    }

    /// Palette with no colors.
    pub const fn plain() -> Self {
        Self {
            reset: "",
            green: "",
            red: "",
            yellow: "",
            blue: "",
        }
    }

    /// Colored when stdout is a terminal that accepts ANSI codes.
    pub fn detect() -> Self {
        if supports_color() && std::io::stdout().is_terminal() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Wrap `text` in `color`, resetting afterwards.
    pub fn paint(&self, color: &str, text: &str) -> String {
        format!("{}{}{}", color, text, self.reset)
    }
}

/// Whether the environment allows ANSI colors (`NO_COLOR`, `TERM=dumb`).
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
