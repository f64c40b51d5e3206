//! Configuration for the Raven viewer.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Every section falls back to its defaults, so older or
//! partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, CameraPolicy, Config, DebugConfig, SkyConfig, WindowConfig};
pub use error::ConfigError;
