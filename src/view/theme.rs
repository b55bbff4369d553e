use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::highlight::HighlightClass;

/// Serializable color representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorDef {
    /// RGB color as [r, g, b]
    Rgb(u8, u8, u8),
    /// Named color
    Named(String),
}

impl From<ColorDef> for Color {
    fn from(def: ColorDef) -> Self {
        match def {
            ColorDef::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorDef::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                // Terminal default, keeps transparency
                "Default" | "Reset" => Color::Reset,
                _ => Color::White,
            },
        }
    }
}

/// On-disk theme layout: `<config_dir>/kite/themes/<name>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    name: String,
    editor_bg: ColorDef,
    editor_fg: ColorDef,
    filler_fg: ColorDef,
    status_bar_fg: ColorDef,
    status_bar_bg: ColorDef,
    message_fg: ColorDef,
    syntax_comment: ColorDef,
    syntax_keyword: ColorDef,
    syntax_type: ColorDef,
    syntax_string: ColorDef,
    syntax_number: ColorDef,
    search_match_fg: ColorDef,
    search_match_bg: ColorDef,
}

/// Colors for everything the screen draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name (e.g., "dark", "light", "high-contrast")
    pub name: String,

    pub editor_bg: Color,
    pub editor_fg: Color,
    /// The `~` markers past the end of the document
    pub filler_fg: Color,

    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub message_fg: Color,

    // Syntax highlighting colors
    pub syntax_comment: Color,
    pub syntax_keyword: Color,
    pub syntax_type: Color,
    pub syntax_string: Color,
    pub syntax_number: Color,

    pub search_match_fg: Color,
    pub search_match_bg: Color,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        Self {
            name: file.name,
            editor_bg: file.editor_bg.into(),
            editor_fg: file.editor_fg.into(),
            filler_fg: file.filler_fg.into(),
            status_bar_fg: file.status_bar_fg.into(),
            status_bar_bg: file.status_bar_bg.into(),
            message_fg: file.message_fg.into(),
            syntax_comment: file.syntax_comment.into(),
            syntax_keyword: file.syntax_keyword.into(),
            syntax_type: file.syntax_type.into(),
            syntax_string: file.syntax_string.into(),
            syntax_number: file.syntax_number.into(),
            search_match_fg: file.search_match_fg.into(),
            search_match_bg: file.search_match_bg.into(),
        }
    }
}

impl Theme {
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        let theme_file: ThemeFile = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse theme file: {}", e))?;
        Ok(theme_file.into())
    }

    fn user_themes_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kite").join("themes"))
    }

    fn load_user_theme(name: &str) -> Option<Self> {
        let path = Self::user_themes_dir()?.join(format!("{}.json", name));
        match Self::from_file(&path) {
            Ok(theme) => Some(theme),
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring theme {:?}: {}", path, e);
                }
                None
            }
        }
    }

    /// Default dark theme, the classic ANSI palette
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            editor_bg: Color::Reset,
            editor_fg: Color::Reset,
            filler_fg: Color::Reset,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::White,
            message_fg: Color::Reset,
            syntax_comment: Color::Cyan,
            syntax_keyword: Color::Yellow,
            syntax_type: Color::Green,
            syntax_string: Color::Magenta,
            syntax_number: Color::Red,
            search_match_fg: Color::Blue,
            search_match_bg: Color::Reset,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            editor_bg: Color::Rgb(255, 255, 255),
            editor_fg: Color::Rgb(30, 30, 30),
            filler_fg: Color::Rgb(160, 160, 160),
            status_bar_fg: Color::Rgb(255, 255, 255),
            status_bar_bg: Color::Rgb(0, 122, 204),
            message_fg: Color::Rgb(30, 30, 30),
            syntax_comment: Color::Rgb(0, 128, 0),
            syntax_keyword: Color::Rgb(0, 0, 255),
            syntax_type: Color::Rgb(38, 127, 153),
            syntax_string: Color::Rgb(163, 21, 21),
            syntax_number: Color::Rgb(9, 134, 88),
            search_match_fg: Color::Rgb(0, 0, 0),
            search_match_bg: Color::Rgb(255, 200, 0),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            editor_bg: Color::Black,
            editor_fg: Color::White,
            filler_fg: Color::Yellow,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Yellow,
            message_fg: Color::White,
            syntax_comment: Color::Gray,
            syntax_keyword: Color::Cyan,
            syntax_type: Color::LightGreen,
            syntax_string: Color::LightYellow,
            syntax_number: Color::LightMagenta,
            search_match_fg: Color::Black,
            search_match_bg: Color::Yellow,
        }
    }

    /// Get a theme by name, defaults to dark if not found.
    /// A user theme file with the same name wins over the built-in one.
    pub fn from_name(name: &str) -> Self {
        let normalized_name = name.to_lowercase().replace('_', "-");

        if let Some(theme) = Self::load_user_theme(&normalized_name) {
            return theme;
        }

        match normalized_name.as_str() {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("Unknown theme {:?}, using dark", other);
                Self::dark()
            }
        }
    }

    /// Style for text of the given highlight class
    pub fn style_for(&self, class: HighlightClass) -> Style {
        let base = Style::default().bg(self.editor_bg);
        match class {
            HighlightClass::Normal => base.fg(self.editor_fg),
            HighlightClass::Comment | HighlightClass::MlComment => base.fg(self.syntax_comment),
            HighlightClass::Keyword1 => base.fg(self.syntax_keyword),
            HighlightClass::Keyword2 => base.fg(self.syntax_type),
            HighlightClass::String => base.fg(self.syntax_string),
            HighlightClass::Number => base.fg(self.syntax_number),
            HighlightClass::Match => Style::default()
                .fg(self.search_match_fg)
                .bg(self.search_match_bg),
        }
    }

    /// Style for control bytes, drawn in reverse video
    pub fn control_style(&self) -> Style {
        Style::default()
            .fg(self.editor_fg)
            .bg(self.editor_bg)
            .add_modifier(Modifier::REVERSED)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar_fg).bg(self.status_bar_bg)
    }

    pub fn filler_style(&self) -> Style {
        Style::default().fg(self.filler_fg).bg(self.editor_bg)
    }

    pub fn message_style(&self) -> Style {
        Style::default().fg(self.message_fg).bg(self.editor_bg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
