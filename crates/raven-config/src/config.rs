//! Configuration sections and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const FILE_NAME: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Sky sphere resolution and shading.
    pub sky: SkyConfig,
    pub camera: CameraConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Raven".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Azimuth samples per ring (at least 2).
    pub width: u32,
    /// Latitude samples including both poles (at least 3).
    pub height: u32,
    /// Shade the sphere from outside. `false` points normals at the centre.
    pub outward_normals: bool,
    /// Scale the unit sphere to the far clip distance around the camera.
    pub scale_to_far_plane: bool,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 16,
            outward_normals: true,
            scale_to_far_plane: true,
        }
    }
}

/// Which movement policy the camera starts with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraPolicy {
    #[default]
    FreeFly,
    Orbit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub policy: CameraPolicy,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Radians.
    pub pitch_limit: f32,
    /// World units per frame.
    pub speed: f32,
    pub mouse_speed_x: f32,
    pub mouse_speed_y: f32,
    /// Pixels from the window edge that trigger a pointer recentre.
    pub edge_margin: i32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            policy: CameraPolicy::FreeFly,
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            pitch_limit: 1.4,
            speed: 0.25,
            mouse_speed_x: 0.0045,
            mouse_speed_y: 0.0025,
            edge_margin: 20,
            min_distance: 5.0,
            max_distance: 15.0,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Show position, yaw and pitch in the window title.
    pub show_stats: bool,
    /// Log filter override (e.g. "debug", "info,raven_camera=trace").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_stats: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Platform config directory for Raven, e.g. `~/.config/raven`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("raven"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(FILE_NAME), serialized).map_err(ConfigError::WriteError)
    }

    /// Returns `Some(new_config)` if the file on disk differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(FILE_NAME))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = Config::default();
        assert_eq!((config.sky.width, config.sky.height), (32, 16));
        assert_eq!(config.camera.position, [0.0, 0.0, 10.0]);
        assert_eq!(config.camera.speed, 0.25);
        assert_eq!(config.camera.edge_margin, 20);
        assert_eq!(
            (config.camera.min_distance, config.camera.max_distance),
            (5.0, 15.0)
        );
        assert_eq!(config.camera.policy, CameraPolicy::FreeFly);
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 32"));
        assert!(ron_str.contains("policy: FreeFly"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(window: (), debug: ())").unwrap();
        assert_eq!(config.sky, SkyConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = ron::from_str("(camera: (policy: Orbit, speed: 0.5))").unwrap();
        assert_eq!(config.camera.policy, CameraPolicy::Orbit);
        assert_eq!(config.camera.speed, 0.5);
        assert_eq!(config.camera.pitch_limit, 1.4);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(fullscreen: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sky.width = 64;
        config.sky.height = 32;
        config.camera.policy = CameraPolicy::Orbit;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.speed = 1.0;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.camera.speed), Some(1.0));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
