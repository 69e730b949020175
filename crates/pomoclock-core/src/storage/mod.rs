mod config;

pub use config::{ClockConfig, Config, PanelConfig};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/pomoclock[-dev]/` based on POMOCLOCK_ENV.
///
/// Set POMOCLOCK_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOCLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomoclock-dev")
    } else {
        base_dir.join("pomoclock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
