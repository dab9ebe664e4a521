//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a [`DiscoveryConfig`](super::DiscoveryConfig)
/// from its file, the environment overrides and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Failed to read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or a key with the wrong type.
    #[error("Invalid TOML in '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A `DISCOVERY_*` environment variable holds an unusable value.
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidOverride {
        variable: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A merged setting is out of range. `key` is the TOML path of the setting.
    #[error("Invalid setting '{key}' in {origin}: {message}")]
    InvalidSetting {
        origin: String,
        key: &'static str,
        message: &'static str,
    },
}
