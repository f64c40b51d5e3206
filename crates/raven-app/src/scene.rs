//! Per-frame scene logic, independent of the window and GPU.
//!
//! [`Scene`] owns the camera, the console, the statistics block and the sky
//! mesh. The window layer feeds it input state once per redraw and applies
//! whatever cursor recentre it asks for.

use std::time::Duration;

use glam::IVec2;
use raven_camera::{CameraController, CameraError, WindowBounds};
use raven_config::Config;
use raven_input::{Key, KeyMap, KeyboardState, MouseState, Pointer};
use raven_overlay::{Console, Statistics, Value, VariableScope, format_decimal, format_vec3};
use raven_render::{MaterialSpec, SkyUniform};
use raven_sphere::Mesh;
use tracing::{debug, info};

use crate::error::AppError;
use crate::settings;

/// What the window layer has to do after a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Move the OS cursor here.
    pub recenter: Option<IVec2>,
    /// The console was opened or closed this frame.
    pub console_toggled: bool,
}

pub struct Scene {
    camera: CameraController,
    bounds: WindowBounds,
    keymap: KeyMap,
    console: Console,
    stats: Statistics,
    show_stats: bool,
    focused: bool,
    mesh: Mesh,
    material: MaterialSpec,
    sky_radius: f32,
}

impl Scene {
    pub fn new(config: &Config, bounds: WindowBounds) -> Result<Self, AppError> {
        let mesh = settings::sky_builder(&config.sky)?.build()?;
        info!(
            "Sky mesh ready: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        let camera = CameraController::looking_at(
            config.camera.position.into(),
            config.camera.target.into(),
            bounds,
            settings::movement_policy(&config.camera),
            settings::camera_settings(&config.camera),
        )?;

        let mut scene = Self {
            camera,
            bounds,
            keymap: KeyMap::default(),
            console: Console::new(),
            stats: Statistics::new(),
            show_stats: config.debug.show_stats,
            focused: true,
            mesh,
            material: settings::sky_material(),
            sky_radius: settings::sky_radius(config),
        };
        scene.refresh_overlays();
        Ok(scene)
    }

    /// Run one frame: console toggle, camera update, overlay refresh.
    pub fn frame(
        &mut self,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        elapsed: Duration,
    ) -> FrameReport {
        let sample = self.keymap.sample(keyboard, mouse);

        let console_toggled = self.keymap.just_pressed(keyboard, Key::Toggle);
        if console_toggled {
            self.console.toggle();
            self.sync_camera_activity(sample.pointer);
        }

        let outcome = self.camera.update(&sample, self.bounds, elapsed);
        self.refresh_overlays();

        FrameReport {
            recenter: outcome.recenter,
            console_toggled,
        }
    }

    /// Window focus changed. The camera only runs while focused and the
    /// console is closed.
    pub fn set_focused(&mut self, focused: bool, pointer: Pointer) {
        self.focused = focused;
        self.sync_camera_activity(pointer);
    }

    fn sync_camera_activity(&mut self, pointer: Pointer) {
        let enabled = self.focused && !self.console.is_enabled();
        if enabled != self.camera.is_enabled() {
            debug!("Camera {}", if enabled { "enabled" } else { "disabled" });
            self.camera.set_enabled(enabled, pointer);
        }
    }

    /// Track a new window size. Zero sizes (minimized) are rejected and the
    /// previous bounds stay in effect.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        self.bounds = WindowBounds::new(width, height)?;
        Ok(())
    }

    fn refresh_overlays(&mut self) {
        let position = self.camera.position();
        let yaw = f64::from(self.camera.yaw().to_degrees());
        let pitch = f64::from(self.camera.pitch().to_degrees());

        self.stats.set("Position", format_vec3(position));
        self.stats.set("Yaw", format_decimal(yaw));
        self.stats.set("Pitch", format_decimal(pitch));

        self.console.set("position", Value::Vec3(position));
        self.console.set("yaw", Value::Float(yaw));
        self.console.set("pitch", Value::Float(pitch));
        self.console
            .set("camera_enabled", Value::Bool(self.camera.is_enabled()));
        self.console
            .set("orbit", Value::Bool(self.camera.policy().is_orbit()));
    }

    /// Shader inputs for the current camera pose.
    pub fn sky_uniform(&self) -> SkyUniform {
        SkyUniform::new(
            self.camera.position(),
            self.sky_radius,
            self.camera.view(),
            self.camera.projection(self.bounds),
            &self.material,
        )
    }

    /// Window title with statistics appended when enabled.
    pub fn title(&self, base: &str) -> String {
        if self.show_stats {
            format!("{base} | {}", self.stats.single_line())
        } else {
            base.to_string()
        }
    }

    /// Whether the OS cursor should be hidden.
    pub fn captures_pointer(&self) -> bool {
        self.camera.is_enabled()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> &MaterialSpec {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use raven_config::CameraPolicy;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    const FRAME: Duration = Duration::from_millis(16);

    fn scene_with(config: &Config) -> (Scene, KeyboardState, MouseState) {
        let scene = Scene::new(config, WindowBounds::new(800, 600).unwrap()).unwrap();
        let mut mouse = MouseState::new();
        mouse.warp_to(IVec2::new(400, 300));
        (scene, KeyboardState::new(), mouse)
    }

    fn press(kb: &mut KeyboardState, code: KeyCode) {
        kb.apply(code, ElementState::Pressed, false);
    }

    fn release(kb: &mut KeyboardState, code: KeyCode) {
        kb.apply(code, ElementState::Released, false);
    }

    #[test]
    fn test_reference_scene_builds() {
        let (scene, _, _) = scene_with(&Config::default());
        assert_eq!(scene.mesh().vertex_count(), 450);
        assert_eq!(scene.camera().position(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(scene.statistics().get("Position"), Some("(0, 0, 10)"));
        assert_eq!(scene.statistics().get("Yaw"), Some("0"));
    }

    #[test]
    fn test_forward_key_moves_camera_and_updates_stats() {
        let (mut scene, mut kb, mouse) = scene_with(&Config::default());
        press(&mut kb, KeyCode::KeyW);
        scene.frame(&kb, &mouse, FRAME);
        assert_eq!(scene.statistics().get("Position"), Some("(0, 0, 9.75)"));
        assert_eq!(
            scene.console().get("position"),
            Some(Value::Vec3(Vec3::new(0.0, 0.0, 9.75)))
        );
    }

    #[test]
    fn test_console_toggle_freezes_camera() {
        let (mut scene, mut kb, mouse) = scene_with(&Config::default());
        press(&mut kb, KeyCode::Backquote);
        let report = scene.frame(&kb, &mouse, FRAME);
        assert!(report.console_toggled);
        assert!(scene.console().is_enabled());
        assert!(!scene.captures_pointer());
        assert_eq!(scene.console().get("camera_enabled"), Some(Value::Bool(false)));

        kb.end_frame();
        release(&mut kb, KeyCode::Backquote);
        press(&mut kb, KeyCode::KeyW);
        scene.frame(&kb, &mouse, FRAME);
        assert_eq!(scene.camera().position(), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_closing_console_resumes_without_jump() {
        let (mut scene, mut kb, mut mouse) = scene_with(&Config::default());
        press(&mut kb, KeyCode::Backquote);
        scene.frame(&kb, &mouse, FRAME);
        kb.end_frame();
        release(&mut kb, KeyCode::Backquote);

        mouse.on_cursor_moved(100.0, 120.0);
        scene.frame(&kb, &mouse, FRAME);
        kb.end_frame();

        press(&mut kb, KeyCode::Backquote);
        scene.frame(&kb, &mouse, FRAME);
        assert!(scene.captures_pointer());
        assert_eq!(scene.camera().direction(), Vec3::NEG_Z);
    }

    #[test]
    fn test_focus_loss_disables_camera() {
        let (mut scene, mut kb, mouse) = scene_with(&Config::default());
        scene.set_focused(false, mouse.pointer());
        press(&mut kb, KeyCode::KeyW);
        scene.frame(&kb, &mouse, FRAME);
        assert_eq!(scene.camera().position().z, 10.0);

        scene.set_focused(true, mouse.pointer());
        scene.frame(&kb, &mouse, FRAME);
        assert_eq!(scene.camera().position().z, 9.75);
    }

    #[test]
    fn test_edge_pointer_reports_recentre() {
        let (mut scene, kb, mut mouse) = scene_with(&Config::default());
        mouse.on_cursor_moved(5.0, 300.0);
        let report = scene.frame(&kb, &mouse, FRAME);
        assert_eq!(report.recenter, Some(IVec2::new(400, 300)));
    }

    #[test]
    fn test_orbit_scene_zooms_with_wheel() {
        let mut config = Config::default();
        config.camera.policy = CameraPolicy::Orbit;
        let (mut scene, kb, mut mouse) = scene_with(&config);
        mouse.on_scroll(winit::event::MouseScrollDelta::LineDelta(0.0, 1.0));
        scene.frame(&kb, &mouse, FRAME);
        assert_eq!(scene.camera().position().z, 9.75);
        assert_eq!(scene.console().get("orbit"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_zero_resize_keeps_bounds() {
        let (mut scene, _, _) = scene_with(&Config::default());
        assert!(scene.resize(0, 0).is_err());
        assert_eq!(scene.bounds(), WindowBounds::new(800, 600).unwrap());
        scene.resize(1024, 768).unwrap();
        assert_eq!(scene.bounds().center(), IVec2::new(512, 384));
    }

    #[test]
    fn test_title_lists_stats_when_enabled() {
        let mut config = Config::default();
        let (scene, _, _) = scene_with(&config);
        assert_eq!(
            scene.title("Raven"),
            "Raven | Position: (0, 0, 10) | Yaw: 0 | Pitch: 0"
        );
        config.debug.show_stats = false;
        let (scene, _, _) = scene_with(&config);
        assert_eq!(scene.title("Raven"), "Raven");
    }

    #[test]
    fn test_sky_uniform_centres_on_camera() {
        let (scene, _, _) = scene_with(&Config::default());
        let uniform = scene.sky_uniform();
        let world = glam::Mat4::from_cols_array_2d(&uniform.world);
        assert_eq!(world.w_axis.truncate(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(world.x_axis.x, 1000.0);
    }

    #[test]
    fn test_invalid_sky_config_fails() {
        let mut config = Config::default();
        config.sky.width = 1;
        let result = Scene::new(&config, WindowBounds::new(800, 600).unwrap());
        assert!(matches!(result, Err(AppError::Mesh(_))));
    }
}
