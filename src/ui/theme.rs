//! Theme management and ANSI escape sequence generation.
//!
//! Themes are small TOML documents: a name plus a `[colors]` table of hex
//! strings. Two are built in; any other file can be loaded at startup.
//!
//! # Built-in Themes
//!
//! - `delv-dark`: dark palette (default)
//! - `delv-light`: light palette
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! text_normal = "#c9d1d9"
//! text_dim = "#6e7681"
//! border = "#30363d"
//! accent = "#58a6ff"
//! sidebar_fg = "#8b949e"
//! sidebar_active_fg = "#0d1117"
//! sidebar_active_bg = "#58a6ff"
//! modal_border = "#d2a8ff"
//! error_fg = "#f85149"
//! success_fg = "#3fb950"
//! ```
//!
//! # Example
//!
//! ```
//! use delv_shell::ui::theme::Theme;
//!
//! let theme = Theme::from_name("delv-light").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.starts_with('\u{1b}'));
//! assert_eq!(theme.name, "delv-light");
//! ```

use crate::domain::error::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names accepted by [`Theme::from_name`].
pub const BUILTIN_THEMES: [&str; 2] = ["delv-dark", "delv-light"];

/// Color scheme for terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, subtitles, secondary info.
    pub text_dim: String,

    pub border: String,
    /// Action indices and highlights.
    pub accent: String,

    pub sidebar_fg: String,
    pub sidebar_active_fg: String,
    pub sidebar_active_bg: String,

    pub modal_border: String,

    pub error_fg: String,
    pub success_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "delv-dark" => include_str!("../../themes/delv-dark.toml"),
            "delv-light" => include_str!("../../themes/delv-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ShellError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| ShellError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns `delv-dark`.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("delv-dark").expect("built-in delv-dark theme should always parse")
    }
}
