use std::collections::BTreeMap;
use std::path::Path;

use crate::media::types::{MediaInfo, MediaKind};

const BUILTIN_TRANSLATIONS: &str = include_str!("../../../assets/translations.json");

/// Language used when the current one lacks a key.
const FALLBACK_LANGUAGE: &str = "en";

type Table = BTreeMap<String, String>;

/// Flat key→string tables per language code.
#[derive(Debug, Clone)]
pub struct Translations {
    tables: BTreeMap<String, Table>,
    current: String,
}

impl Translations {
    pub fn builtin() -> Self {
        let tables = match serde_json::from_str(BUILTIN_TRANSLATIONS) {
            Ok(tables) => tables,
            Err(e) => {
                log::error!("Failed to parse built-in translations: {e}");
                BTreeMap::new()
            }
        };
        Self::from_tables(tables)
    }

    fn from_tables(tables: BTreeMap<String, Table>) -> Self {
        Self {
            tables,
            current: FALLBACK_LANGUAGE.to_string(),
        }
    }

    /// Built-in tables, replaced by `translations.json` in the config dir if present.
    pub fn load(config_dir: Option<&Path>) -> Self {
        config_dir
            .map(|dir| dir.join("translations.json"))
            .filter(|path| path.is_file())
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_else(Self::builtin)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<BTreeMap<String, Table>>(&json) {
            Ok(tables) if !tables.is_empty() => {
                log::info!("Loaded {} languages from {}", tables.len(), path.display());
                Some(Self::from_tables(tables))
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!("Ignoring translations {}: {e}", path.display());
                None
            }
        }
    }

    /// Switch language. Unknown codes are kept too; lookups then use the fallback.
    pub fn set_language(&mut self, code: &str) {
        if !self.tables.contains_key(code) {
            log::warn!("No translations for '{code}', falling back to '{FALLBACK_LANGUAGE}'");
        }
        self.current = code.to_string();
    }

    /// (code, display name) of every available language.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tables.iter().map(|(code, table)| {
            let name = table.get("language_name").map_or(code.as_str(), String::as_str);
            (code.as_str(), name)
        })
    }

    /// Look up `key` in the current language, then the fallback, then echo the key.
    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        [self.current.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|lang| self.tables.get(*lang).and_then(|t| t.get(key)))
            .map_or(key, String::as_str)
    }

    /// [`tr`](Self::tr) with `{name}` placeholders substituted.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.tr(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// Info line for the open media.
    pub fn describe_media(&self, info: &MediaInfo) -> String {
        let width = info.width.to_string();
        let height = info.height.to_string();
        match info.kind {
            MediaKind::Video => {
                let frames = info.frame_count.to_string();
                let fps = format_fps(info.fps);
                self.format(
                    "video_info",
                    &[
                        ("width", width.as_str()),
                        ("height", height.as_str()),
                        ("total_frames", frames.as_str()),
                        ("fps", fps.as_str()),
                    ],
                )
            }
            MediaKind::Image => self.format(
                "image_info",
                &[("width", width.as_str()), ("height", height.as_str())],
            ),
        }
    }
}

fn format_fps(fps: f64) -> String {
    if fps.fract() == 0.0 {
        format!("{fps:.0}")
    } else {
        format!("{fps:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Translations {
        let tables = serde_json::from_str(
            r#"{
                "ru": {"language_name": "Русский", "title": "Редактор"},
                "en": {"language_name": "English", "title": "Editor", "theme": "Theme",
                       "video_info": "{width}x{height}, {total_frames} frames @ {fps}"}
            }"#,
        )
        .unwrap();
        Translations::from_tables(tables)
    }

    #[test]
    fn builtin_tables_cover_both_languages() {
        let t = Translations::builtin();
        let codes: Vec<_> = t.languages().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["en", "ru"]);
    }

    #[test]
    fn builtin_languages_share_keys() {
        let t = Translations::builtin();
        let en: Vec<_> = t.tables["en"].keys().collect();
        let ru: Vec<_> = t.tables["ru"].keys().collect();
        assert_eq!(en, ru);
    }

    #[test]
    fn lookup_uses_current_language() {
        let mut t = sample();
        t.set_language("ru");
        assert_eq!(t.tr("title"), "Редактор");
    }

    #[test]
    fn lookup_falls_back_to_english_then_key() {
        let mut t = sample();
        t.set_language("ru");
        assert_eq!(t.tr("theme"), "Theme");
        assert_eq!(t.tr("no_such_key"), "no_such_key");

        t.set_language("de");
        assert_eq!(t.tr("title"), "Editor");
    }

    #[test]
    fn language_names() {
        let t = sample();
        let langs: Vec<_> = t.languages().collect();
        assert_eq!(langs, vec![("en", "English"), ("ru", "Русский")]);
    }

    #[test]
    fn describe_video() {
        let t = sample();
        let info = MediaInfo {
            kind: MediaKind::Video,
            width: 1920,
            height: 1080,
            frame_count: 90,
            fps: 30.0,
        };
        assert_eq!(t.describe_media(&info), "1920x1080, 90 frames @ 30");
    }

    #[test]
    fn fps_formatting() {
        assert_eq!(format_fps(25.0), "25");
        assert_eq!(format_fps(29.970_029), "29.97");
        assert_eq!(format_fps(0.0), "0");
    }

    #[test]
    fn override_file_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("translations.json"),
            r#"{"fr": {"language_name": "Français", "title": "Éditeur"}}"#,
        )
        .unwrap();
        let mut t = Translations::load(Some(dir.path()));
        t.set_language("fr");
        assert_eq!(t.tr("title"), "Éditeur");
    }

    #[test]
    fn corrupt_override_keeps_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("translations.json"), "[1, 2").unwrap();
        let t = Translations::load(Some(dir.path()));
        assert!(t.languages().any(|(code, _)| code == "ru"));
    }
}
