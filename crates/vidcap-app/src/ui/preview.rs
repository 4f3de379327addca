use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, Ui};

use crate::media::scale;
use crate::media::types::DecodedFrame;
use crate::playback::RenderSurface;

use super::theme::colors::theme_colors;

/// The preview canvas. Frames are uploaded as one egui texture that is
/// replaced in place, and painted centered at the fitted size.
pub struct PreviewSurface {
    ctx: egui::Context,
    texture: Option<TextureHandle>,
    /// Canvas size in physical pixels, as of the last layout pass.
    canvas: (u32, u32),
    fitted: (u32, u32),
    frame_size: (u32, u32),
    /// Canvas size `fitted` was computed for.
    fitted_for: (u32, u32),
}

impl PreviewSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            texture: None,
            canvas: (0, 0),
            fitted: (0, 0),
            frame_size: (0, 0),
            fitted_for: (0, 0),
        }
    }

    /// Drop the current picture.
    pub fn clear(&mut self) {
        self.texture = None;
        self.fitted = (0, 0);
        self.frame_size = (0, 0);
    }

    /// Lay out the canvas in the remaining space and paint the current frame,
    /// or `hint` centered when there is nothing to show.
    pub fn show(&mut self, ui: &mut Ui, hint: Option<&str>) {
        let tc = theme_colors(ui.ctx());
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let ppp = ui.ctx().pixels_per_point();
        self.canvas = (
            (rect.width() * ppp).round().max(0.0) as u32,
            (rect.height() * ppp).round().max(0.0) as u32,
        );
        self.refit();

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, tc.preview);

        if let Some(texture) = &self.texture {
            let image_rect = self.image_rect(rect, ppp);
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        } else if let Some(hint) = hint {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                hint,
                egui::FontId::proportional(16.0),
                tc.text_secondary,
            );
        }
    }

    /// Stills are drawn once, so a resized canvas refits the last frame here.
    fn refit(&mut self) {
        if self.texture.is_some() && self.canvas != self.fitted_for {
            let (w, h) = self.frame_size;
            self.fitted = scale::fit(w, h, self.canvas.0, self.canvas.1);
            self.fitted_for = self.canvas;
        }
    }

    /// Where the fitted frame lands inside `canvas`, in points.
    fn image_rect(&self, canvas: Rect, ppp: f32) -> Rect {
        let bounds = (self.canvas.0.max(self.fitted.0), self.canvas.1.max(self.fitted.1));
        let (x, y) = scale::centered(self.fitted, bounds);
        let min = canvas.min + egui::vec2(x as f32 / ppp, y as f32 / ppp);
        Rect::from_min_size(
            min,
            egui::vec2(self.fitted.0 as f32 / ppp, self.fitted.1 as f32 / ppp),
        )
    }
}

impl RenderSurface for PreviewSurface {
    fn size(&self) -> (u32, u32) {
        self.canvas
    }

    fn draw(&mut self, frame: &DecodedFrame, fitted: (u32, u32)) {
        let expected = (frame.width as usize) * (frame.height as usize) * 4;
        if frame.byte_len() != expected {
            log::warn!(
                "Dropping {}x{} frame with {} bytes (expected {expected})",
                frame.width,
                frame.height,
                frame.byte_len()
            );
            return;
        }
        let image = ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(self.ctx.load_texture("preview", image, TextureOptions::LINEAR));
            }
        }
        self.fitted = fitted;
        self.frame_size = (frame.width, frame.height);
        self.fitted_for = self.canvas;
        self.ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_before_layout() {
        let surface = PreviewSurface::new(egui::Context::default());
        assert_eq!(surface.size(), (0, 0));
        assert!(!surface.texture.is_some());
    }

    #[test]
    fn draw_uploads_and_clear_drops() {
        let mut surface = PreviewSurface::new(egui::Context::default());
        surface.draw(&DecodedFrame::blank(4, 2), (200, 100));
        assert!(surface.texture.is_some());
        assert_eq!(surface.fitted, (200, 100));

        surface.draw(&DecodedFrame::blank(4, 2), (100, 50));
        assert_eq!(surface.fitted, (100, 50));

        surface.clear();
        assert!(!surface.texture.is_some());
    }

    #[test]
    fn resized_canvas_refits_last_frame() {
        let mut surface = PreviewSurface::new(egui::Context::default());
        surface.canvas = (400, 400);
        surface.draw(&DecodedFrame::blank(4, 2), (400, 200));

        surface.refit();
        assert_eq!(surface.fitted, (400, 200));

        surface.canvas = (800, 200);
        surface.refit();
        assert_eq!(surface.fitted, (400, 200));

        surface.canvas = (1000, 1000);
        surface.refit();
        assert_eq!(surface.fitted, (1000, 500));
    }

    #[test]
    fn image_rect_is_centered() {
        let mut surface = PreviewSurface::new(egui::Context::default());
        surface.canvas = (800, 600);
        surface.fitted = (800, 450);
        let canvas = Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(400.0, 300.0));
        let rect = surface.image_rect(canvas, 2.0);
        assert_eq!(rect.min, egui::pos2(10.0, 57.5));
        assert_eq!(rect.size(), egui::vec2(400.0, 225.0));
    }
}
