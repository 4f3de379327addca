use std::time::Duration;

use egui::Context;
use winit::event::WindowEvent;
use winit::window::Window;

use super::theme::ThemeMode;
use super::theme::colors::set_theme_colors;
use super::theme::tokens::SPACING;

/// egui state plus the wgpu renderer that paints it onto the window surface.
pub struct EguiOverlay {
    pub state: egui_winit::State,
    pub renderer: egui_wgpu::Renderer,
    pub theme: ThemeMode,
    shapes: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen_descriptor: egui_wgpu::ScreenDescriptor,
    repaint_delay: Option<Duration>,
}

impl EguiOverlay {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        window: &Window,
        theme: ThemeMode,
    ) -> Self {
        let ctx = Context::default();
        ctx.set_visuals(theme.visuals());
        set_theme_colors(&ctx, theme.colors());

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(SPACING, SPACING * 0.5);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        ctx.set_style(style);

        let viewport_id = ctx.viewport_id();
        let state = egui_winit::State::new(ctx, viewport_id, window, None, None, None);

        let renderer = egui_wgpu::Renderer::new(
            device,
            format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                ..Default::default()
            },
        );

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        Self {
            state,
            renderer,
            theme,
            shapes: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
            screen_descriptor,
            repaint_delay: None,
        }
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        let ctx = self.state.egui_ctx();
        ctx.set_visuals(theme.visuals());
        set_theme_colors(ctx, theme.colors());
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    pub fn context(&self) -> Context {
        self.state.egui_ctx().clone()
    }

    /// How soon egui asked to be repainted after the last pass, if at all.
    pub fn repaint_delay(&self) -> Option<Duration> {
        self.repaint_delay
    }

    pub fn resize(&mut self, width: u32, height: u32, pixels_per_point: f32) {
        self.screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point,
        };
    }

    pub fn begin_frame(&mut self, window: &Window) {
        // Refresh theme colors each frame so panels always have them
        set_theme_colors(self.state.egui_ctx(), self.theme.colors());
        let raw_input = self.state.take_egui_input(window);
        self.state.egui_ctx().begin_pass(raw_input);
    }

    pub fn end_frame(&mut self, window: &Window) {
        let output = self.state.egui_ctx().end_pass();
        self.state
            .handle_platform_output(window, output.platform_output);
        self.repaint_delay = output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay)
            .filter(|delay| *delay != Duration::MAX);
        self.shapes = self
            .state
            .egui_ctx()
            .tessellate(output.shapes, output.pixels_per_point);
        self.textures_delta = output.textures_delta;
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.shapes,
            &self.screen_descriptor,
        );

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(self.theme)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut pass = pass.forget_lifetime();
            self.renderer
                .render(&mut pass, &self.shapes, &self.screen_descriptor);
        }

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Window background in linear space, for the surface clear.
fn clear_color(theme: ThemeMode) -> wgpu::Color {
    let rgba = egui::Rgba::from(theme.colors().background);
    wgpu::Color {
        r: f64::from(rgba.r()),
        g: f64::from(rgba.g()),
        b: f64::from(rgba.b()),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_is_opaque_and_theme_dependent() {
        let light = clear_color(ThemeMode::Light);
        let dark = clear_color(ThemeMode::Dark);
        assert_eq!(light.a, 1.0);
        assert!((light.r - 1.0).abs() < 1e-6);
        assert!(dark.r < light.r);
    }
}
