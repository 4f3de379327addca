use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::caption::CaptionEditor;
use crate::gpu::GpuContext;
use crate::i18n::Translations;
use crate::library::{self, Library, LibraryError};
use crate::media::types::MediaInfo;
use crate::media::{FileOpener, MediaError};
use crate::playback::{Session, TickOutcome, TickQueue};
use crate::settings::Settings;
use crate::ui::panels::{self, PanelView};
use crate::ui::theme::ThemeMode;
use crate::ui::{EguiOverlay, PreviewSurface};

/// Room around the media for the file list and caption editor, in pixels.
pub const WINDOW_EXTRA_WIDTH: u32 = 820;
pub const WINDOW_EXTRA_HEIGHT: u32 = 400;

pub struct App {
    pub gpu: GpuContext,
    pub egui_overlay: EguiOverlay,
    pub window: Arc<Window>,
    pub settings: Settings,
    pub translations: Translations,
    pub library: Library,
    pub session: Session,
    pub ticks: TickQueue,
    pub preview: PreviewSurface,
    pub caption: CaptionEditor,
    /// Last error or notice for the status bar.
    pub status: Option<String>,
    opener: FileOpener,
}

impl App {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let gpu = GpuContext::new(window.clone())?;

        let settings = Settings::load();
        let mut translations = Translations::load(Settings::config_dir().as_deref());
        translations.set_language(&settings.language);
        window.set_title(translations.tr("title"));

        let egui_overlay = EguiOverlay::new(&gpu.device, gpu.format, &window, settings.theme);
        let preview = PreviewSurface::new(egui_overlay.context());

        if !crate::media::video::ffmpeg_available() {
            log::warn!("ffmpeg/ffprobe not found on PATH; videos will not open");
        }

        Ok(Self {
            gpu,
            egui_overlay,
            window,
            settings,
            translations,
            library: Library::default(),
            session: Session::new(),
            ticks: TickQueue::new(),
            preview,
            caption: CaptionEditor::default(),
            status: None,
            opener: FileOpener,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.egui_overlay
            .resize(width, height, self.window.scale_factor() as f32);
    }

    /// Load a dropped or picked folder and show its first file.
    pub fn load_folder(&mut self, folder: &Path) {
        let library = match Library::load(folder) {
            Ok(library) => library,
            Err(e @ LibraryError::NotADirectory(_)) => {
                log::warn!("{e}");
                self.status = Some(self.translations.tr("drop_folder_message").to_string());
                return;
            }
            Err(e) => {
                log::error!("{e}");
                self.status = Some(e.to_string());
                return;
            }
        };

        self.session.clear();
        self.preview.clear();
        self.caption.close();
        self.library = library;
        self.status = None;

        if self.library.files.is_empty() {
            return;
        }
        if let Some(info) = self.select_index(0) {
            self.fit_window_to(&info);
        }
    }

    /// Switch the preview and caption to the file at `index`.
    pub fn select_index(&mut self, index: usize) -> Option<MediaInfo> {
        let path: PathBuf = self.library.files.get(index)?.clone();
        // A file whose open or playback failed is reopened on reselect
        if self.library.selected == Some(index) && self.session.is_showing(&path) {
            return self.session.info();
        }

        match self.session.select(&path, &self.opener, &mut self.ticks) {
            Ok(info) => {
                if let Some(state) = self.session.playback_state()
                    && state.is_playing
                {
                    log::debug!("Playing {} every {:?}", path.display(), state.target_interval);
                }
                self.library.selected = Some(index);
                self.status = None;
                if let Err(e) = self.caption.open(library::sidecar_path(&path)) {
                    log::error!("{e}");
                    self.status = Some(e.to_string());
                }
                Some(info)
            }
            Err(e) => {
                log::error!("{e}");
                self.status = Some(self.describe_open_error(&path, &e));
                None
            }
        }
    }

    fn describe_open_error(&self, path: &Path, error: &MediaError) -> String {
        let file = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let reason = match error {
            MediaError::Unreadable { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        self.translations
            .format("open_failed", &[("file", file.as_str()), ("error", reason.as_str())])
    }

    /// Persist the caption buffer after an edit.
    pub fn on_caption_changed(&mut self) {
        if let Err(e) = self.caption.flush() {
            log::error!("{e}");
            let reason = e.to_string();
            self.status = Some(
                self.translations
                    .format("save_failed", &[("error", reason.as_str())]),
            );
        }
    }

    pub fn set_language(&mut self, code: &str) {
        self.translations.set_language(code);
        self.window.set_title(self.translations.tr("title"));
        self.settings.language = code.to_string();
        self.settings.save();
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.egui_overlay.set_theme(theme);
        self.settings.theme = theme;
        self.settings.save();
    }

    /// Grow (positive) or shrink (negative) the caption and info fonts.
    pub fn step_font_size(&mut self, step: i32) {
        if step > 0 {
            self.settings.increase_text_size();
        } else if !self.settings.decrease_text_size() {
            return;
        }
        self.settings.save();
    }

    /// Fire every tick whose deadline has passed. Returns true if a frame was drawn.
    pub fn fire_due_ticks(&mut self, now: Instant) -> bool {
        let mut drew = false;
        while let Some(token) = self.ticks.pop_due(now) {
            match self.session.fire(&token, &mut self.preview, &mut self.ticks) {
                Ok(TickOutcome::Rendered | TickOutcome::Finished) => drew = true,
                Ok(TickOutcome::Stale | TickOutcome::Deferred) => {}
                Err(e) => {
                    log::error!("Playback stopped: {e}");
                    self.status = Some(e.to_string());
                    drew = true;
                }
            }
        }
        drew
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticks.next_deadline()
    }

    /// Build this frame's egui output.
    pub fn run_ui(&mut self) {
        self.egui_overlay.begin_frame(&self.window);
        let ctx = self.egui_overlay.context();
        let view = PanelView {
            tr: &self.translations,
            library: &self.library,
            settings: &self.settings,
            info: self
                .session
                .info()
                .map(|info| self.translations.describe_media(&info)),
            status: self.status.as_deref(),
            caption_enabled: self.caption.path.is_some(),
        };
        panels::draw_panels(&ctx, &view, &mut self.caption.text, &mut self.preview);
        self.egui_overlay.end_frame(&self.window);
    }

    /// Resize the window around the first file of a freshly loaded folder.
    fn fit_window_to(&self, info: &MediaInfo) {
        let Some(monitor) = self.window.current_monitor() else {
            return;
        };
        let screen = monitor.size();
        let (width, height) = preferred_window_size((info.width, info.height), (screen.width, screen.height));

        let outer = self
            .window
            .outer_position()
            .unwrap_or(PhysicalPosition::new(0, 0));
        let current_height = self.window.outer_size().height;
        let origin = monitor.position();
        let y = realigned_y(outer.y - origin.y, current_height, height, screen.height)
            .map_or(outer.y, |y| origin.y + y);

        let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
        self.window
            .set_outer_position(PhysicalPosition::new(outer.x, y));
        log::debug!("Window resized to {width}x{height} for {}x{} media", info.width, info.height);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("vidcap-encoder"),
                });

        self.egui_overlay
            .render(&self.gpu.device, &self.gpu.queue, &mut encoder, &surface_view);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Window size for showing `media` at full size next to the side panels,
/// capped at 95% of the screen.
pub fn preferred_window_size(media: (u32, u32), screen: (u32, u32)) -> (u32, u32) {
    let max_w = (f64::from(screen.0) * 0.95) as u32;
    let max_h = (f64::from(screen.1) * 0.95) as u32;
    (
        media.0.saturating_add(WINDOW_EXTRA_WIDTH).min(max_w),
        media.1.saturating_add(WINDOW_EXTRA_HEIGHT).min(max_h),
    )
}

/// New top edge (relative to the screen) when the window sits within 5% of
/// the screen bottom, placing it a quarter of the way down the free space.
/// `None` keeps the current position.
pub fn realigned_y(current_y: i32, current_height: u32, new_height: u32, screen_height: u32) -> Option<i32> {
    if screen_height == 0 {
        return None;
    }
    let bottom_margin = i64::from(screen_height) - (i64::from(current_y) + i64::from(current_height));
    if (bottom_margin as f64) / f64::from(screen_height) < 0.05 {
        let free = i64::from(screen_height) - i64::from(new_height);
        Some((free.div_euclid(4)) as i32)
    } else {
        None
    }
}

/// Initial window origin: centered horizontally, a quarter of the free space from the top.
pub fn initial_window_origin(window: (u32, u32), screen: (u32, u32)) -> (i32, i32) {
    (
        (screen.0.saturating_sub(window.0) / 2) as i32,
        (screen.1.saturating_sub(window.1) / 4) as i32,
    )
}
