//! Theme and styling configuration.
//!
//! Widgets draw with colors from a [`Theme`]. The default palette matches a
//! dark terminal; applications can load their own from a TOML file, e.g.:
//!
//! ```toml
//! accent = "Yellow"
//! header = "Cyan"
//! selected = "Green"
//! ```

use std::path::Path;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a theme file.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The file could not be read.
    #[error("could not read theme file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid theme TOML.
    #[error("invalid theme file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Color palette shared by all widgets.
///
/// Every field has a default, so a theme file only needs to name the colors
/// it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Primary text color.
    pub text: Color,
    /// De-emphasized text (placeholders, empty messages, hints).
    pub muted: Color,
    /// Accent for the focused widget's border and title.
    pub accent: Color,
    /// Border color of unfocused widgets.
    pub border: Color,
    /// Header row color.
    pub header: Color,
    /// Checked checkbox color.
    pub selected: Color,
    /// Background of the cursor row while focused.
    pub highlight_bg: Color,
    /// Skeleton placeholder color for the loading state.
    pub skeleton: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Yellow,
            border: Color::DarkGray,
            header: Color::Cyan,
            selected: Color::Green,
            highlight_bg: Color::DarkGray,
            skeleton: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Load a theme from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
