//! Loudscape - a live microphone waterfall
//!
//! Each capture buffer becomes one loudness sample; every frame the newest
//! window of samples becomes the front row of a surface and older rows scroll
//! back in depth.

use anyhow::Context;
use clap::Parser;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use loudscape::audio::{list_input_devices, AmplitudeHistory, CaptureSystem};
use loudscape::camera::{CameraState, PointerButton};
use loudscape::cli::Args;
use loudscape::params::{CameraParams, RenderConfig, SurfaceParams};
use loudscape::rendering::{RenderSystem, Uniforms};
use loudscape::surface::{ColorMap, SurfaceGrid, SurfaceUpdater, Vertex};

/// Rolling frame-time window, summarised to the debug log once per second
struct FrameStats {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    last_report: Instant,
}

impl FrameStats {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::new(),
            last_frame: now,
            last_report: now,
        }
    }

    fn record_frame(&mut self) {
        let now = Instant::now();
        self.frame_times.push_back(now - self.last_frame);
        self.last_frame = now;
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if now - self.last_report > Duration::from_secs(1) {
            let total: Duration = self.frame_times.iter().sum();
            let avg = total.as_secs_f32() / self.frame_times.len() as f32;
            if avg > 0.0 {
                log::debug!("FPS: {:.1}", 1.0 / avg);
            }
            self.last_report = now;
        }
    }
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Audio (capture writes, render loop reads)
    history: Arc<AmplitudeHistory>,
    capture: Option<CaptureSystem>,

    // Surface
    grid: SurfaceGrid,
    updater: SurfaceUpdater,
    colors: ColorMap,
    vertices: Vec<Vertex>,
    span: f32,

    camera: CameraState,
    render_config: RenderConfig,
    frame_stats: FrameStats,

    /// Error that ended the event loop, returned from `main`
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(
        surface_params: &SurfaceParams,
        history: Arc<AmplitudeHistory>,
        capture: CaptureSystem,
    ) -> Self {
        let grid = SurfaceGrid::new(surface_params);
        let vertices = Vec::with_capacity(grid.rows() * grid.columns());

        Self {
            window: None,
            render_system: None,
            history,
            capture: Some(capture),
            grid,
            updater: SurfaceUpdater::new(surface_params),
            colors: ColorMap::from_params(surface_params),
            vertices,
            span: surface_params.span,
            camera: CameraState::new(&CameraParams::default()),
            render_config: RenderConfig::default(),
            frame_stats: FrameStats::new(),
            fatal: None,
        }
    }

    /// Stop capture before anything it writes into is released.
    /// Safe to call more than once.
    fn shutdown(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if capture.is_faulted() {
                log::warn!("Audio stream on {} reported errors", capture.device_name());
            }
            if let Err(e) = capture.shutdown() {
                log::warn!("{}", e);
            }
            log::info!("Audio capture stopped");
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.fatal = Some(error);
        self.shutdown();
        event_loop.exit();
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_system.is_none() {
            return;
        }

        // Advance the waterfall from the latest loudness window
        if let Err(e) = self.updater.tick(&self.history, &mut self.grid) {
            self.fail(event_loop, e.into());
            return;
        }

        let Some(ref mut render_system) = self.render_system else {
            return;
        };
        self.grid.write_vertices(&self.colors, &mut self.vertices);
        render_system.update_vertices(&self.vertices);

        let uniforms = Uniforms {
            view_proj: self.camera.view_proj_matrix(self.span).to_cols_array_2d(),
        };
        render_system.update_uniforms(&uniforms);

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.frame_stats.record_frame();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("Failed to create window"));
                return;
            }
        };

        match pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.grid)) {
            Ok(render_system) => self.render_system = Some(render_system),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        log::info!(
            "Rendering {}x{} surface. Drag to rotate, right-drag to zoom, Q or Esc to quit",
            self.grid.rows(),
            self.grid.columns()
        );

        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ),
                        ..
                    },
                ..
            } => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return,
                };
                match state {
                    ElementState::Pressed => self.camera.button_pressed(button),
                    ElementState::Released => self.camera.button_released(button),
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.camera.pointer_moved(position.x, position.y);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_devices {
        for name in list_input_devices()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let surface_params = args.surface_params();
    surface_params.validate()?;

    // History length equals the column count: one column per loudness sample
    let history = Arc::new(AmplitudeHistory::new(surface_params.columns));
    let capture = CaptureSystem::start(&args.capture_config(), Arc::clone(&history))
        .context("Audio startup failed")?;

    let mut app = App::new(&surface_params, history, capture);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    app.shutdown();
    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
