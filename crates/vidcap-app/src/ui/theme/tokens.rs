use egui::Color32;

// Dark theme colors
pub const DARK_BACKGROUND: Color32 = Color32::from_rgb(0x2C, 0x3E, 0x50);
pub const DARK_PREVIEW: Color32 = Color32::from_rgb(0x1F, 0x2B, 0x38);
pub const DARK_TEXT: Color32 = Color32::WHITE;
pub const DARK_TEXT_SECONDARY: Color32 = Color32::from_rgb(0xBD, 0xC3, 0xC7);
pub const DARK_ACCENT: Color32 = Color32::from_rgb(0x4D, 0xA8, 0xDA);
pub const DARK_ERROR: Color32 = Color32::from_rgb(0xE7, 0x6F, 0x60);
pub const DARK_WIDGET_BG: Color32 = Color32::from_rgb(0x34, 0x49, 0x5E);
pub const DARK_WIDGET_BG_HOVER: Color32 = Color32::from_rgb(0x3D, 0x56, 0x6E);
pub const DARK_WIDGET_BG_ACTIVE: Color32 = Color32::from_rgb(0x46, 0x62, 0x7D);
pub const DARK_SEPARATOR: Color32 = Color32::from_rgb(0x3F, 0x55, 0x6B);

// Light theme colors
pub const LIGHT_BACKGROUND: Color32 = Color32::WHITE;
pub const LIGHT_PREVIEW: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);
pub const LIGHT_TEXT: Color32 = Color32::BLACK;
pub const LIGHT_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x5A, 0x5A, 0x5A);
pub const LIGHT_ACCENT: Color32 = Color32::from_rgb(0x09, 0x69, 0xA8);
pub const LIGHT_ERROR: Color32 = Color32::from_rgb(0xC0, 0x30, 0x30);
pub const LIGHT_WIDGET_BG: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);
pub const LIGHT_WIDGET_BG_HOVER: Color32 = Color32::from_rgb(0xE2, 0xE2, 0xE2);
pub const LIGHT_WIDGET_BG_ACTIVE: Color32 = Color32::from_rgb(0xD4, 0xD4, 0xD4);
pub const LIGHT_SEPARATOR: Color32 = Color32::from_rgb(0xD5, 0xD5, 0xD5);

// Layout constants
pub const PANEL_ROUNDING: u8 = 6;
pub const WIDGET_ROUNDING: u8 = 4;
pub const SPACING: f32 = 8.0;
pub const CAPTION_PANEL_HEIGHT: f32 = 220.0;
pub const LIBRARY_PANEL_WIDTH: f32 = 260.0;
