use egui::Color32;

use super::tokens::*;

/// Runtime theme color set used by the panels.
/// Stored in egui temp data, read via `theme_colors(ctx)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Color32,
    pub preview: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub error: Color32,
    pub text_bg: Color32,
    pub separator: Color32,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            background: DARK_BACKGROUND,
            preview: DARK_PREVIEW,
            text: DARK_TEXT,
            text_secondary: DARK_TEXT_SECONDARY,
            accent: DARK_ACCENT,
            error: DARK_ERROR,
            text_bg: DARK_PREVIEW,
            separator: DARK_SEPARATOR,
        }
    }

    pub fn light() -> Self {
        Self {
            background: LIGHT_BACKGROUND,
            preview: LIGHT_PREVIEW,
            text: LIGHT_TEXT,
            text_secondary: LIGHT_TEXT_SECONDARY,
            accent: LIGHT_ACCENT,
            error: LIGHT_ERROR,
            text_bg: LIGHT_PREVIEW,
            separator: LIGHT_SEPARATOR,
        }
    }
}

const THEME_COLORS_ID: &str = "vidcap_theme_colors";

/// Store theme colors in egui temp data.
pub fn set_theme_colors(ctx: &egui::Context, colors: ThemeColors) {
    ctx.data_mut(|d| d.insert_temp(egui::Id::new(THEME_COLORS_ID), colors));
}

/// Read theme colors from egui temp data (fallback: light).
pub fn theme_colors(ctx: &egui::Context) -> ThemeColors {
    ctx.data(|d| d.get_temp(egui::Id::new(THEME_COLORS_ID)))
        .unwrap_or_else(ThemeColors::light)
}
