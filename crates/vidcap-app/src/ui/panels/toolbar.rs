use egui::Ui;

use crate::i18n::Translations;
use crate::settings::Settings;
use crate::ui::theme::ThemeMode;

pub const SET_LANGUAGE: &str = "set_language";
pub const SET_THEME: &str = "set_theme";
pub const FONT_SIZE_STEP: &str = "font_size_step";
pub const OPEN_FOLDER: &str = "open_folder";

pub fn draw_toolbar(ui: &mut Ui, tr: &Translations, settings: &Settings) {
    ui.horizontal(|ui| {
        ui.menu_button("⚙", |ui| {
            ui.menu_button(tr.tr("language"), |ui| {
                for (code, name) in tr.languages() {
                    if ui.selectable_label(code == settings.language, name).clicked()
                        && code != settings.language
                    {
                        let code = code.to_string();
                        ui.ctx()
                            .data_mut(|d| d.insert_temp(egui::Id::new(SET_LANGUAGE), code));
                    }
                }
            });
            ui.menu_button(tr.tr("theme"), |ui| {
                for &mode in ThemeMode::ALL {
                    if ui
                        .selectable_label(mode == settings.theme, tr.tr(mode.label_key()))
                        .clicked()
                        && mode != settings.theme
                    {
                        ui.ctx()
                            .data_mut(|d| d.insert_temp(egui::Id::new(SET_THEME), mode));
                    }
                }
            });
        });

        ui.separator();

        if ui.button("+").clicked() {
            ui.ctx()
                .data_mut(|d| d.insert_temp(egui::Id::new(FONT_SIZE_STEP), 1i32));
        }
        if ui.button("−").clicked() {
            ui.ctx()
                .data_mut(|d| d.insert_temp(egui::Id::new(FONT_SIZE_STEP), -1i32));
        }

        ui.separator();

        if ui.button(tr.tr("open_folder")).clicked() {
            ui.ctx()
                .data_mut(|d| d.insert_temp(egui::Id::new(OPEN_FOLDER), true));
        }
    });
}
