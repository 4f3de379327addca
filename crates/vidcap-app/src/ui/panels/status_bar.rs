use egui::{RichText, Ui};

use crate::ui::theme::colors::theme_colors;

pub fn draw_status_bar(ui: &mut Ui, status: Option<&str>) {
    let tc = theme_colors(ui.ctx());

    ui.horizontal(|ui| {
        match status {
            Some(message) => {
                ui.colored_label(tc.error, RichText::new(message).small());
            }
            None => {
                ui.label("");
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(concat!("vidcap ", env!("CARGO_PKG_VERSION")))
                    .small()
                    .color(tc.text_secondary),
            );
        });
    });
}
