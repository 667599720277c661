// src/config.rs

//! Configuration loading utilities.
//!
//! Precedence, highest first: process environment, `.env` file,
//! TOML config file, compiled defaults.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "seat-monitor.toml";

/// Load `.env` into the process environment without overriding
/// variables that are already set.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Load configuration and apply environment overrides.
///
/// An explicitly requested file must load; the default path falls back
/// to compiled defaults when missing or broken.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => Config::load(path).map_err(|e| {
            AppError::config(format!("Failed to load config from {}: {e}", path.display()))
        })?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    };
    config.apply_env();
    Ok(config)
}

/// Load, override and validate configuration.
pub fn load_validated(explicit: Option<&Path>) -> Result<Config> {
    let config = load(explicit)?;
    config.validate()?;
    Ok(config)
}
