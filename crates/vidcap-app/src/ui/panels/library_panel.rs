use egui::{Key, RichText, Ui};

use crate::i18n::Translations;
use crate::library::Library;
use crate::ui::theme::colors::theme_colors;

pub const SELECT_FILE: &str = "select_file";

pub fn draw_library_panel(ui: &mut Ui, tr: &Translations, library: &Library) {
    let tc = theme_colors(ui.ctx());

    if let Some(folder) = &library.folder {
        let name = folder
            .file_name()
            .map_or_else(|| folder.display().to_string(), |n| n.to_string_lossy().into_owned());
        ui.label(RichText::new(name).strong());
        ui.separator();
    }

    if library.is_loaded() && library.files.is_empty() {
        ui.label(RichText::new(tr.tr("no_media")).color(tc.text_secondary));
        return;
    }

    let mut picked = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for index in 0..library.files.len() {
                let name = library.file_name(index).unwrap_or("?");
                let selected = library.selected == Some(index);
                let response = ui.selectable_label(selected, name);
                if response.clicked() {
                    picked = Some(index);
                }
            }
        });

    // Arrow keys step through the list unless a text field has focus
    if picked.is_none() && !ui.ctx().wants_keyboard_input() {
        picked = step_selection(ui, library);
    }

    if let Some(index) = picked {
        ui.ctx().data_mut(|d| d.insert_temp(egui::Id::new(SELECT_FILE), index));
    }
}

fn step_selection(ui: &Ui, library: &Library) -> Option<usize> {
    let (down, up) = ui.input(|i| (i.key_pressed(Key::ArrowDown), i.key_pressed(Key::ArrowUp)));
    let delta = match (down, up) {
        (true, false) => 1,
        (false, true) => -1,
        _ => return None,
    };
    next_index(library.selected, delta, library.files.len())
}

/// Neighbor of `current` in a list of `len`, clamped to the ends.
fn next_index(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match current {
        Some(i) => i.saturating_add_signed(delta).min(len - 1),
        None => 0,
    };
    (Some(next) != current).then_some(next)
}
