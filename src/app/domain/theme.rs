use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use syntect::highlighting::{Color as SyntectColor, Theme, ThemeSet};

use crate::app::infrastructure::error::{AppError, Result};

pub type Rgb = (u8, u8, u8);

/// Light/dark preference, either chosen explicitly or taken from the ambient signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Dark, ColorScheme::Light];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Syntect theme used when this scheme is applied as a preset.
    pub fn preset_key(self) -> &'static str {
        match self {
            Self::Light => "base16-ocean.light",
            Self::Dark => "base16-ocean.dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Where the ambient scheme comes from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

/// A named entry in the theme catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDefinition {
    pub name: String,
    /// Key into the catalogue's syntect `ThemeSet`.
    pub key: String,
    pub background: Rgb,
    pub foreground: Rgb,
    pub caret: Rgb,
    pub selection: Rgb,
    pub is_dark: bool,
}

impl ThemeDefinition {
    fn from_theme(key: &str, theme: &Theme) -> Self {
        let background = rgb_or(theme.settings.background, (255, 255, 255));
        let foreground = rgb_or(theme.settings.foreground, (0, 0, 0));
        let caret = rgb_or(theme.settings.caret, foreground);
        let selection = rgb_or(theme.settings.selection, (173, 216, 230));
        Self {
            name: key.to_string(),
            key: key.to_string(),
            background,
            foreground,
            caret,
            selection,
            is_dark: luminance(background) < 128.0,
        }
    }
}

fn rgb_or(color: Option<SyntectColor>, fallback: Rgb) -> Rgb {
    color.map(|c| (c.r, c.g, c.b)).unwrap_or(fallback)
}

fn luminance((r, g, b): Rgb) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// The theme applied to an editor host: a scheme preset or a catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTheme {
    Preset(ColorScheme),
    Custom(ThemeDefinition),
}

impl EditorTheme {
    pub fn theme_key(&self) -> &str {
        match self {
            Self::Preset(scheme) => scheme.preset_key(),
            Self::Custom(def) => &def.key,
        }
    }
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self::Preset(ColorScheme::Light)
    }
}

/// Fixed set of named themes: syntect's bundled themes plus any `.tmTheme`
/// files from a user folder.
pub struct ThemeCatalogue {
    theme_set: ThemeSet,
    entries: BTreeMap<String, ThemeDefinition>,
}

impl ThemeCatalogue {
    pub fn load_defaults() -> Self {
        Self::from_theme_set(ThemeSet::load_defaults())
    }

    /// Bundled themes plus every `.tmTheme` under `folder`, keyed by file stem.
    pub fn with_folder(folder: &Path) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        theme_set
            .add_from_folder(folder)
            .map_err(|e| AppError::Theme(format!("{}: {}", folder.display(), e)))?;
        Ok(Self::from_theme_set(theme_set))
    }

    fn from_theme_set(theme_set: ThemeSet) -> Self {
        let entries = theme_set
            .themes
            .iter()
            .map(|(key, theme)| (key.clone(), ThemeDefinition::from_theme(key, theme)))
            .collect();
        Self { theme_set, entries }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeDefinition> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Syntect theme backing an editor theme.
    pub fn theme(&self, editor_theme: &EditorTheme) -> Option<&Theme> {
        self.theme_set.themes.get(editor_theme.theme_key())
    }

    /// Colors of an editor theme, whether preset or custom.
    pub fn definition(&self, editor_theme: &EditorTheme) -> Option<ThemeDefinition> {
        match editor_theme {
            EditorTheme::Custom(def) => Some(def.clone()),
            EditorTheme::Preset(scheme) => self.entries.get(scheme.preset_key()).cloned(),
        }
    }
}

/// Gallery theme state: an explicit catalogue choice overriding the ambient scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelection {
    ambient: ColorScheme,
    selected: Option<String>,
}

impl ThemeSelection {
    pub fn new(ambient: ColorScheme) -> Self {
        Self {
            ambient,
            selected: None,
        }
    }

    pub fn ambient(&self) -> ColorScheme {
        self.ambient
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn set_ambient(&mut self, scheme: ColorScheme) {
        self.ambient = scheme;
    }

    /// `None` is the placeholder entry and restores the ambient theme.
    pub fn select(&mut self, name: Option<String>) {
        self.selected = name;
    }

    pub fn effective(&self, catalogue: &ThemeCatalogue) -> EditorTheme {
        match self.selected.as_deref().and_then(|name| catalogue.get(name)) {
            Some(def) => EditorTheme::Custom(def.clone()),
            None => EditorTheme::Preset(self.ambient),
        }
    }
}
