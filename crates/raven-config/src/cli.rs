//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{CameraPolicy, Config};

/// Raven command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "raven", about = "Sky sphere viewer with a free-fly or orbit camera")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Sky sphere azimuth samples.
    #[arg(long)]
    pub sky_width: Option<u32>,

    /// Sky sphere latitude samples, poles included.
    #[arg(long)]
    pub sky_height: Option<u32>,

    /// Start with the orbit camera instead of free-fly.
    #[arg(long)]
    pub orbit: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(w) = args.sky_width {
            self.sky.width = w;
        }
        if let Some(h) = args.sky_height {
            self.sky.height = h;
        }
        if args.orbit {
            self.camera.policy = CameraPolicy::Orbit;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["raven", "--sky-width", "64", "--orbit", "--width", "1920"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.sky.width, 64);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.camera.policy, CameraPolicy::Orbit);
        assert_eq!(config.sky.height, 16);
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::parse_from(["raven"]));
        assert_eq!(config, original);
    }

    #[test]
    fn test_config_dir_flag() {
        let args = CliArgs::parse_from(["raven", "--config", "/tmp/raven-cfg", "--log-level", "debug"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/raven-cfg")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
