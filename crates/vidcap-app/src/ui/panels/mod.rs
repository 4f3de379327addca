pub mod caption_panel;
pub mod library_panel;
pub mod status_bar;
pub mod toolbar;

use egui::Context;

use crate::i18n::Translations;
use crate::library::Library;
use crate::settings::Settings;
use crate::ui::preview::PreviewSurface;
use crate::ui::theme::tokens::{CAPTION_PANEL_HEIGHT, LIBRARY_PANEL_WIDTH};

/// Read-only view of app state the panels need for one frame.
pub struct PanelView<'a> {
    pub tr: &'a Translations,
    pub library: &'a Library,
    pub settings: &'a Settings,
    /// Formatted info line of the open media.
    pub info: Option<String>,
    /// Last error or notice.
    pub status: Option<&'a str>,
    /// Whether a sidecar is bound and the caption can be edited.
    pub caption_enabled: bool,
}

/// Remove and return a signal a panel queued in egui temp data this frame.
pub fn take_signal<T: Clone + Default + Send + Sync + 'static>(ctx: &Context, key: &str) -> Option<T> {
    ctx.data_mut(|d| d.remove_temp(egui::Id::new(key)))
}

/// Draw the whole window: toolbar, file list, preview, caption editor and status bar.
pub fn draw_panels(
    ctx: &Context,
    view: &PanelView<'_>,
    caption: &mut String,
    preview: &mut PreviewSurface,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        toolbar::draw_toolbar(ui, view.tr, view.settings);
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        status_bar::draw_status_bar(ui, view.status);
    });

    egui::SidePanel::left("library_panel")
        .default_width(LIBRARY_PANEL_WIDTH)
        .show(ctx, |ui| {
            library_panel::draw_library_panel(ui, view.tr, view.library);
        });

    egui::TopBottomPanel::bottom("caption_panel")
        .resizable(true)
        .default_height(CAPTION_PANEL_HEIGHT)
        .show(ctx, |ui| {
            caption_panel::draw_caption_panel(
                ui,
                view.info.as_deref(),
                caption,
                view.caption_enabled,
                view.settings,
            );
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let hint = if !view.library.is_loaded() {
                Some(view.tr.tr("drag_folder_hint"))
            } else if view.library.files.is_empty() {
                Some(view.tr.tr("no_media"))
            } else {
                None
            };
            preview.show(ui, hint);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeMode;

    #[test]
    fn signals_are_taken_once() {
        let ctx = Context::default();
        ctx.data_mut(|d| {
            d.insert_temp(egui::Id::new(library_panel::SELECT_FILE), 3usize);
            d.insert_temp(egui::Id::new(toolbar::SET_THEME), ThemeMode::Dark);
        });

        assert_eq!(take_signal::<usize>(&ctx, library_panel::SELECT_FILE), Some(3));
        assert_eq!(take_signal::<usize>(&ctx, library_panel::SELECT_FILE), None);
        assert_eq!(take_signal::<ThemeMode>(&ctx, toolbar::SET_THEME), Some(ThemeMode::Dark));
    }

    #[test]
    fn missing_signal_is_none() {
        let ctx = Context::default();
        assert_eq!(take_signal::<String>(&ctx, toolbar::SET_LANGUAGE), None);
        assert_eq!(take_signal::<bool>(&ctx, toolbar::OPEN_FOLDER), None);
    }
}
