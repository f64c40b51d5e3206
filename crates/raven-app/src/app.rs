//! Window creation and event handling via winit.

use std::sync::Arc;
use std::time::Instant;

use glam::IVec2;
use raven_camera::WindowBounds;
use raven_config::Config;
use raven_input::{KeyboardState, MouseState};
use raven_render::{
    ContentBuilder, GpuContentBuilder, RenderContext, RenderError, SkyRenderer,
    init_render_context_blocking,
};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::scene::Scene;

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
}

/// Camera bounds for a window size, `None` while either side is zero.
fn client_bounds(size: PhysicalSize<u32>) -> Option<WindowBounds> {
    WindowBounds::new(size.width, size.height).ok()
}

struct Gpu {
    context: RenderContext,
    renderer: SkyRenderer,
}

pub struct RavenApp {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    scene: Option<Scene>,
    keyboard: KeyboardState,
    mouse: MouseState,
    last_frame: Instant,
    title: String,
    fatal: Option<AppError>,
}

impl RavenApp {
    pub fn new(config: Config) -> Self {
        let now = Instant::now();
        Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            last_frame: now,
            title: String::new(),
            fatal: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let size = window.inner_size();
        info!("Window created: {}x{}", size.width, size.height);
        self.window = Some(window.clone());

        match client_bounds(size) {
            Some(bounds) => self.build_scene(window, bounds),
            None => {
                warn!("Window has no client area yet, waiting for a resize");
                Ok(())
            }
        }
    }

    /// Camera, sky mesh and GPU state for a window with a usable size.
    fn build_scene(&mut self, window: Arc<Window>, bounds: WindowBounds) -> Result<(), AppError> {
        let scene = Scene::new(&self.config, bounds)?;

        let context = init_render_context_blocking(window.clone())?;
        let model = GpuContentBuilder::new(&context.device).build(scene.mesh(), scene.material())?;
        let renderer = SkyRenderer::new(
            &context.device,
            context.surface_format,
            model,
            &scene.sky_uniform(),
        );

        self.gpu = Some(Gpu { context, renderer });
        self.recentre_cursor(bounds.center());
        self.apply_cursor_capture(scene.captures_pointer());
        self.scene = Some(scene);
        window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn recentre_cursor(&mut self, at: IVec2) {
        if let Some(window) = &self.window
            && let Err(e) = window.set_cursor_position(PhysicalPosition::new(at.x, at.y))
        {
            warn!("Cannot move cursor: {e}");
        }
        self.mouse.warp_to(at);
    }

    fn apply_cursor_capture(&self, captured: bool) {
        if let Some(window) = &self.window {
            window.set_cursor_visible(!captured);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let report = scene.frame(&self.keyboard, &self.mouse, elapsed);
        let captured = scene.captures_pointer();
        let title = scene.title(&self.config.window.title);
        let uniform = scene.sky_uniform();

        if let Some(at) = report.recenter {
            self.recentre_cursor(at);
        }
        if report.console_toggled {
            self.apply_cursor_capture(captured);
        }
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }

        if let Some(gpu) = &mut self.gpu {
            gpu.renderer.update(&gpu.context.queue, &uniform);
            match gpu.context.render(&gpu.renderer) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    let config = &gpu.context.surface_config;
                    let (w, h) = (config.width, config.height);
                    gpu.context.resize(w, h);
                }
                Err(RenderError::Timeout) => warn!("Surface timeout, skipping frame"),
                Err(e) => {
                    self.fail(event_loop, e.into());
                    return;
                }
            }
        }

        self.keyboard.end_frame();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for RavenApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.initialize(event_loop)
        {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if self.scene.is_none() {
                    if let Some(window) = self.window.clone()
                        && let Some(bounds) = client_bounds(size)
                        && let Err(e) = self.build_scene(window, bounds)
                    {
                        self.fail(event_loop, e);
                    }
                    return;
                }
                if let Some(scene) = &mut self.scene
                    && let Err(e) = scene.resize(size.width, size.height)
                {
                    warn!("Ignoring resize: {e}");
                    return;
                }
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size.width, size.height);
                }
                info!("Window resized to {}x{}", size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                if !focused {
                    self.keyboard.release_all();
                }
                if let Some(scene) = &mut self.scene {
                    scene.set_focused(focused, self.mouse.pointer());
                    let captured = scene.captures_pointer();
                    self.apply_cursor_capture(captured);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state == ElementState::Pressed
                {
                    info!("Escape pressed, shutting down");
                    event_loop.exit();
                    return;
                }
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Create the event loop and run until the window closes.
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = RavenApp::new(config);
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_attributes_use_config_size_and_title() {
        let mut config = Config::default();
        config.window.title = "Sky".to_string();
        config.window.width = 1024;
        config.window.height = 768;
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Sky");
        assert_eq!(
            attrs.inner_size,
            Some(PhysicalSize::new(1024u32, 768u32).into())
        );
    }

    #[test]
    fn test_zero_sized_window_has_no_bounds() {
        assert!(client_bounds(PhysicalSize::new(0, 0)).is_none());
        assert!(client_bounds(PhysicalSize::new(0, 600)).is_none());
        assert!(client_bounds(PhysicalSize::new(800, 0)).is_none());
        let bounds = client_bounds(PhysicalSize::new(800, 600)).unwrap();
        assert_eq!((bounds.width(), bounds.height()), (800, 600));
    }

    #[test]
    fn test_new_app_has_no_window() {
        let app = RavenApp::new(Config::default());
        assert!(app.window.is_none());
        assert!(app.scene.is_none());
        assert!(app.fatal.is_none());
    }
}
