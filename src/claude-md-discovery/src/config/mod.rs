//! Configuration loading.
//!
//! This module handles parsing `discovery.toml` files, applying environment
//! overrides and validating the result.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{DiscoveryConfig, OUTPUT_DIR_ENV, SCENARIOS_DIR_ENV, TARGET_REPOSITORY_ENV};

use std::path::Path;
use tracing::info;

/// Resolves the configuration for a run.
///
/// When `path` is `None` the built-in defaults are used. Environment overrides
/// are applied afterwards and the final configuration is validated.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be loaded or the configuration
/// fails validation.
pub fn load_config(path: Option<&Path>) -> Result<DiscoveryConfig, ConfigError> {
    let (mut config, origin) = match path {
        Some(path) => (DiscoveryConfig::load(path)?, path.display().to_string()),
        None => (DiscoveryConfig::default(), "<defaults>".to_string()),
    };

    config.apply_env_overrides()?;
    config.validate(&origin)?;

    info!(
        origin = %origin,
        scenarios_dir = %config.scenarios_dir.display(),
        target_repository = %config.report.target_repository,
        "Loaded discovery configuration"
    );
    Ok(config)
}
