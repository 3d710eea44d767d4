mod config;
pub mod log;
pub mod stats;

pub use config::{BellConfig, BoxBreathingConfig, Config};
pub use log::SessionLog;
pub use stats::{KindTotals, LogStats};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default name of the session log inside the data directory.
pub const LOG_FILE_NAME: &str = "meditation_log.csv";

/// Returns `~/.config/calm[-dev]/` based on CALM_ENV.
///
/// Set CALM_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CALM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("calm-dev")
    } else {
        base_dir.join("calm")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
