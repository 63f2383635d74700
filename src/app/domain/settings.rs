use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::height::EditorHeight;
use super::theme::{ColorScheme, ThemeMode};
use crate::app::infrastructure::error::AppError;

/// What to do when a sample cannot be loaded. The user never sees an error
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Swallow the failure.
    Silent,
    /// Record the failure in the log.
    Log,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Language selected when the demo page mounts
    #[serde(default = "default_language")]
    pub default_language: String,

    #[serde(default = "default_height")]
    pub default_height: EditorHeight,

    /// Theme preset selected when the demo page mounts
    #[serde(default)]
    pub default_scheme: ColorScheme,

    #[serde(default = "default_ambient_mode")]
    pub ambient_mode: ThemeMode,

    /// Seconds between OS color scheme checks; 0 disables polling
    #[serde(default = "default_ambient_poll_secs")]
    pub ambient_poll_secs: u64,

    /// Directory with `sample.<language>.txt` files, consulted before the bundled samples
    #[serde(default)]
    pub samples_dir: Option<PathBuf>,

    /// Markdown shown under the demo editor instead of the bundled README
    #[serde(default)]
    pub readme_path: Option<PathBuf>,

    /// Extra `.tmTheme` files for the gallery
    #[serde(default)]
    pub themes_dir: Option<PathBuf>,

    /// Extra `.sublime-syntax` files, e.g. SQL dialect grammars
    #[serde(default)]
    pub syntaxes_dir: Option<PathBuf>,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_load_failure")]
    pub load_failure: FailurePolicy,
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_height() -> EditorHeight {
    EditorHeight::Fixed(500)
}

fn default_ambient_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_ambient_poll_secs() -> u64 {
    5
}

const MIN_FONT_SIZE: u32 = 8;
const MAX_FONT_SIZE: u32 = 48;

fn default_font_size() -> u32 {
    14
}

fn default_load_failure() -> FailurePolicy {
    FailurePolicy::Log
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            default_height: default_height(),
            default_scheme: ColorScheme::default(),
            ambient_mode: default_ambient_mode(),
            ambient_poll_secs: default_ambient_poll_secs(),
            samples_dir: None,
            readme_path: None,
            themes_dir: None,
            syntaxes_dir: None,
            font_size: default_font_size(),
            load_failure: default_load_failure(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    if let Err(e) = settings.validate() {
                        log::warn!("{}. Using default font size.", e);
                        settings.font_size = default_font_size();
                    }
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                if let Err(e) = default.save_to(config_path) {
                    log::debug!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(AppError::Settings(format!(
                "font size {} outside {}..={}",
                self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("editor-showcase");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_language, "javascript");
        assert_eq!(settings.default_height, EditorHeight::Fixed(500));
        assert_eq!(settings.default_scheme, ColorScheme::Light);
        assert_eq!(settings.ambient_mode, ThemeMode::SystemDefault);
        assert_eq!(settings.ambient_poll_secs, 5);
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.load_failure, FailurePolicy::Log);
        assert!(settings.samples_dir.is_none());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"default_language": "rust", "default_height": "auto"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.default_language, "rust");
        assert_eq!(settings.default_height, EditorHeight::Auto);
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn test_scheme_and_policy_serialization() {
        let settings = AppSettings {
            default_scheme: ColorScheme::Dark,
            load_failure: FailurePolicy::Silent,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"dark\""));
        assert!(json.contains("\"Silent\""));
    }

    #[test]
    fn test_invalid_height_rejected() {
        let json = r#"{"default_height": "enormous"}"#;
        assert!(serde_json::from_str::<AppSettings>(json).is_err());
    }

    #[test]
    fn test_load_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_corrupt_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ this is not json").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_out_of_range_font_size_is_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"font_size": 2, "default_language": "go"}"#).unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.default_language, "go");
    }

    #[test]
    fn test_validate() {
        assert!(AppSettings::default().validate().is_ok());
        let settings = AppSettings {
            font_size: 100,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Settings(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            samples_dir: Some(PathBuf::from("/opt/samples")),
            ambient_poll_secs: 0,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }
}
