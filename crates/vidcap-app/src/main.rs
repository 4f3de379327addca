mod app;
mod caption;
mod gpu;
mod i18n;
mod library;
mod media;
mod playback;
mod settings;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossbeam_channel::Receiver;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};

use app::App;
use ui::panels::{caption_panel, library_panel, take_signal, toolbar};
use ui::theme::ThemeMode;

const INITIAL_WIDTH: u32 = 1280;
const INITIAL_HEIGHT: u32 = 800;

struct VidcapApp {
    app: Option<App>,
    proxy: EventLoopProxy<()>,
    folder_dialog_rx: Option<Receiver<PathBuf>>,
    /// Folder given on the command line, loaded once the window exists.
    startup_folder: Option<PathBuf>,
    /// When egui asked to be repainted next.
    repaint_at: Option<Instant>,
}

impl VidcapApp {
    fn new(proxy: EventLoopProxy<()>, startup_folder: Option<PathBuf>) -> Self {
        Self {
            app: None,
            proxy,
            folder_dialog_rx: None,
            startup_folder,
            repaint_at: None,
        }
    }

    fn open_folder_dialog(&mut self) {
        if self.folder_dialog_rx.is_some() {
            return;
        }
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.folder_dialog_rx = Some(rx);
        let proxy = self.proxy.clone();
        let spawned = std::thread::Builder::new()
            .name("folder-dialog".into())
            .spawn(move || {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    let _ = tx.send(path);
                }
                drop(tx);
                // Wake the event loop to drain the result
                let _ = proxy.send_event(());
            });
        if let Err(e) = spawned {
            log::error!("Failed to open folder dialog: {e}");
            self.folder_dialog_rx = None;
        }
    }

    fn drain_folder_dialog(&mut self) {
        let Some(rx) = &self.folder_dialog_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(path) => {
                self.folder_dialog_rx = None;
                if let Some(app) = self.app.as_mut() {
                    app.load_folder(&path);
                    app.window.request_redraw();
                }
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                // Dialog was cancelled (sender dropped without sending)
                self.folder_dialog_rx = None;
            }
            Err(crossbeam_channel::TryRecvError::Empty) => {}
        }
    }

    /// Apply the actions panels queued in egui temp data this frame.
    /// Returns true if anything changed.
    fn handle_ui_signals(&mut self) -> bool {
        let Some(app) = self.app.as_mut() else {
            return false;
        };
        let ctx = app.egui_overlay.context();
        let mut changed = false;

        if take_signal::<bool>(&ctx, caption_panel::CAPTION_CHANGED).is_some() {
            app.on_caption_changed();
        }

        if let Some(index) = take_signal::<usize>(&ctx, library_panel::SELECT_FILE) {
            app.select_index(index);
            changed = true;
        }

        if let Some(code) = take_signal::<String>(&ctx, toolbar::SET_LANGUAGE) {
            app.set_language(&code);
            changed = true;
        }

        if let Some(theme) = take_signal::<ThemeMode>(&ctx, toolbar::SET_THEME) {
            app.set_theme(theme);
            changed = true;
        }

        if let Some(step) = take_signal::<i32>(&ctx, toolbar::FONT_SIZE_STEP) {
            app.step_font_size(step);
            changed = true;
        }

        if take_signal::<bool>(&ctx, toolbar::OPEN_FOLDER).is_some() {
            self.open_folder_dialog();
        }

        changed
    }
}

impl ApplicationHandler for VidcapApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("vidcap")
            .with_inner_size(winit::dpi::PhysicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window: Arc<Window> = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Some(monitor) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        {
            let monitor_size = monitor.size();
            let window_size = window.outer_size();
            let monitor_pos = monitor.position();
            let (x, y) = app::initial_window_origin(
                (window_size.width, window_size.height),
                (monitor_size.width, monitor_size.height),
            );
            window.set_outer_position(winit::dpi::PhysicalPosition::new(
                monitor_pos.x + x,
                monitor_pos.y + y,
            ));
        }

        match App::new(window) {
            Ok(mut app) => {
                log::info!("vidcap initialized");
                if let Some(folder) = self.startup_folder.take() {
                    app.load_folder(&folder);
                }
                app.window.request_redraw();
                self.app = Some(app);
            }
            Err(e) => {
                log::error!("Failed to initialize app: {e}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: ()) {
        self.drain_folder_dialog();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        // Let egui handle events first
        let response = app.egui_overlay.handle_event(&app.window, &event);
        if response.repaint {
            app.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                app.session.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.resize(size.width, size.height);
                app.window.request_redraw();
            }
            WindowEvent::DroppedFile(path) => {
                app.load_folder(&path);
                app.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                app.run_ui();

                match app.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app.gpu.reconfigure();
                        app.window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("Surface error: {e}");
                    }
                }

                self.repaint_at = match app.egui_overlay.repaint_delay() {
                    Some(delay) if delay.is_zero() => {
                        app.window.request_redraw();
                        None
                    }
                    Some(delay) => Some(Instant::now() + delay),
                    None => None,
                };

                if self.handle_ui_signals()
                    && let Some(app) = self.app.as_ref()
                {
                    app.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        let now = Instant::now();
        let mut redraw = app.fire_due_ticks(now);
        if self.repaint_at.is_some_and(|at| at <= now) {
            self.repaint_at = None;
            redraw = true;
        }
        if redraw {
            app.window.request_redraw();
        }

        let wake = match (app.next_deadline(), self.repaint_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        event_loop.set_control_flow(match wake {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        });
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let startup_folder = std::env::args_os().nth(1).map(PathBuf::from);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = VidcapApp::new(event_loop.create_proxy(), startup_folder);
    event_loop.run_app(&mut app)?;

    Ok(())
}
