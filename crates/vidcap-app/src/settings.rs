use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ui::theme::ThemeMode;

pub const DEFAULT_LANGUAGE: &str = "ru";
pub const DEFAULT_TEXT_SIZE: u32 = 12;
pub const DEFAULT_INFO_SIZE: u32 = 9;

/// Caption font size cannot shrink past this (exclusive).
const MIN_TEXT_SIZE: u32 = 10;
/// Info label font size cannot shrink past this (exclusive).
const MIN_INFO_SIZE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: String,
    pub theme: ThemeMode,
    pub text_size: u32,
    pub info_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            theme: ThemeMode::Light,
            text_size: DEFAULT_TEXT_SIZE,
            info_size: DEFAULT_INFO_SIZE,
        }
    }
}

impl Settings {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vidcap"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read settings, falling back to defaults on a missing or corrupt file.
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring corrupt settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }

    pub fn increase_text_size(&mut self) {
        self.text_size += 1;
        self.info_size += 1;
    }

    /// Shrink both sizes by one. Returns false at the lower bound.
    pub fn decrease_text_size(&mut self) -> bool {
        if self.text_size > MIN_TEXT_SIZE && self.info_size > MIN_INFO_SIZE {
            self.text_size -= 1;
            self.info_size -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings.language, "ru");
        assert_eq!(settings.theme, ThemeMode::Light);
        assert_eq!(settings.text_size, 12);
        assert_eq!(settings.info_size, 9);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.language, "ru");
        assert_eq!(settings.text_size, 12);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            language: "en".into(),
            theme: ThemeMode::Dark,
            text_size: 15,
            info_size: 11,
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn file_format_matches_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "language": "ru",
                "theme": "light",
                "text_size": 12,
                "info_size": 9,
            })
        );
    }

    #[test]
    fn text_size_bounds() {
        let mut settings = Settings::default();
        settings.increase_text_size();
        assert_eq!((settings.text_size, settings.info_size), (13, 10));

        let mut shrinks = 0;
        while settings.decrease_text_size() {
            shrinks += 1;
        }
        assert_eq!(shrinks, 3);
        assert_eq!((settings.text_size, settings.info_size), (10, 7));
    }

    #[test]
    fn info_size_floor_blocks_shrinking() {
        let mut settings = Settings {
            text_size: 30,
            info_size: 1,
            ..Settings::default()
        };
        assert!(!settings.decrease_text_size());
        assert_eq!(settings.text_size, 30);
    }
}
