pub mod colors;
pub mod dark;
pub mod light;
pub mod tokens;

use egui::Visuals;
use serde::{Deserialize, Serialize};

use colors::ThemeColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: &[ThemeMode] = &[ThemeMode::Light, ThemeMode::Dark];

    /// Translation key of the menu label.
    pub fn label_key(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light_theme",
            ThemeMode::Dark => "dark_theme",
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            ThemeMode::Light => light::light_visuals(),
            ThemeMode::Dark => dark::dark_visuals(),
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            ThemeMode::Light => ThemeColors::light(),
            ThemeMode::Dark => ThemeColors::dark(),
        }
    }
}
