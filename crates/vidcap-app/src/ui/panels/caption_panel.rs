use egui::{FontId, RichText, Ui};

use crate::settings::Settings;
use crate::ui::theme::colors::theme_colors;

pub const CAPTION_CHANGED: &str = "caption_changed";

pub fn draw_caption_panel(
    ui: &mut Ui,
    info: Option<&str>,
    caption: &mut String,
    enabled: bool,
    settings: &Settings,
) {
    let tc = theme_colors(ui.ctx());

    ui.add_space(4.0);
    ui.label(
        RichText::new(info.unwrap_or_default())
            .size(settings.info_size as f32)
            .color(tc.text_secondary),
    );
    ui.add_space(4.0);

    let editor = egui::TextEdit::multiline(caption)
        .font(FontId::proportional(settings.text_size as f32))
        .background_color(tc.text_bg)
        .desired_width(f32::INFINITY)
        .desired_rows(6);
    let response = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| ui.add_enabled(enabled, editor))
        .inner;

    if response.changed() {
        ui.ctx()
            .data_mut(|d| d.insert_temp(egui::Id::new(CAPTION_CHANGED), true));
    }
}
