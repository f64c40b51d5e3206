use clap::Parser;
use raven_app::AppError;
use raven_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let Some(config_dir) = args.config.clone().or_else(Config::default_dir) else {
        eprintln!("{}", AppError::NoConfigDir);
        std::process::exit(2);
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    raven_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", config_dir.display());

    if let Err(e) = raven_app::run(config) {
        error!("Raven exited with an error: {e}");
        std::process::exit(1);
    }
}
