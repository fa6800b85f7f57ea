//! Color themes for the TUI.

use ratatui::style::Color;

/// Colors used by the plan screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name as used in configuration
    pub name: String,
    /// Titles, focused fields, progress bar
    pub primary: Color,
    /// Section headings
    pub accent: Color,
    /// Main text
    pub text: Color,
    /// Hints and labels
    pub text_dim: Color,
    /// Block borders
    pub border: Color,
    /// Success messages
    pub success: Color,
    /// Warnings (generation failures)
    pub warning: Color,
    /// Errors (export failures)
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme - works well on both light and dark terminals.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: Color::Rgb(99, 102, 241),   // Indigo
            accent: Color::Rgb(251, 146, 60),    // Orange
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175), // Gray-400
            border: Color::Rgb(75, 85, 99),      // Gray-600
            success: Color::Rgb(34, 197, 94),    // Green
            warning: Color::Rgb(234, 179, 8),    // Yellow
            error: Color::Rgb(239, 68, 68),      // Red
        }
    }

    /// Dracula theme - dark purple and pink.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: Color::Rgb(189, 147, 249),
            accent: Color::Rgb(255, 121, 198),
            text: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(98, 114, 164),
            border: Color::Rgb(68, 71, 90),
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(255, 184, 108),
            error: Color::Rgb(255, 85, 85),
        }
    }

    /// Nord theme - arctic, bluish colors.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            primary: Color::Rgb(136, 192, 208),
            accent: Color::Rgb(208, 135, 112),
            text: Color::Rgb(236, 239, 244),
            text_dim: Color::Rgb(216, 222, 233),
            border: Color::Rgb(67, 76, 94),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
        }
    }

    /// Get a theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "dracula" => Some(Self::dracula()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }

    /// Resolve a configured theme name, falling back to the default.
    pub fn from_config(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "Unknown theme, using default");
            Self::default_theme()
        })
    }

    /// List all available built-in theme names.
    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "dracula", "nord"]
    }
}
