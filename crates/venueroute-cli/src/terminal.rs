//! Terminal styling and color utilities.
//!
//! This module provides ANSI escape code definitions and color detection
//! for terminal output formatting.

use venueroute_lib::Category;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bright bold white for emphasis (node ids).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (coordinates, distances).
    pub const GRAY: &str = "\x1b[90m";
    /// Green for entrances and exits.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for medical points.
    pub const RED: &str = "\x1b[31m";
    /// Magenta for stages.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Orange (256-color) for food vendors.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub magenta: &'static str,
    pub orange: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            red: colors::RED,
            magenta: colors::MAGENTA,
            orange: colors::ORANGE,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            red: "",
            magenta: "",
            orange: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color used for a category tag.
    #[must_use]
    pub fn category(&self, category: Category) -> &'static str {
        match category {
            Category::Entry | Category::Exit => self.green,
            Category::Medical => self.red,
            Category::Stage => self.magenta,
            Category::Food => self.orange,
            Category::Path => self.gray,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
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
