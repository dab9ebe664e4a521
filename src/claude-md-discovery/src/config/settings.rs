//! Discovery settings deserialization.

use crate::config::ConfigError;
use crate::loader::validate_repo_name;
use crate::rate_limit::{RateLimitPolicy, RetryPolicy};
use crate::report::{PriorityThresholds, ReportSettings};
use crate::search::SearchSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides [`DiscoveryConfig::scenarios_dir`].
pub const SCENARIOS_DIR_ENV: &str = "DISCOVERY_SCENARIOS_DIR";

/// Overrides [`ReportSettings::target_repository`].
pub const TARGET_REPOSITORY_ENV: &str = "DISCOVERY_TARGET_REPOSITORY";

/// Overrides [`ReportSettings::output_dir`].
pub const OUTPUT_DIR_ENV: &str = "DISCOVERY_OUTPUT_DIR";

/// Complete configuration for a discovery run, parsed from a `discovery.toml` file.
///
/// Every field has a default, so an empty file (or no file at all) yields the
/// production settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscoveryConfig {
    /// Root of the `category/owner_repo/` tree holding already curated entries.
    pub scenarios_dir: PathBuf,

    /// Code search behaviour.
    pub search: SearchSettings,

    /// Score thresholds for the priority buckets.
    pub scoring: PriorityThresholds,

    /// Report and issue settings.
    pub report: ReportSettings,

    /// Retry policy for external calls.
    pub retry: RetryPolicy,

    /// Adaptive rate-limit waiting.
    pub rate_limit: RateLimitPolicy,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scenarios_dir: PathBuf::from("scenarios"),
            search: SearchSettings::default(),
            scoring: PriorityThresholds::default(),
            report: ReportSettings::default(),
            retry: RetryPolicy::default(),
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Parses a configuration from TOML text.
    ///
    /// `origin` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading discovery configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Applies environment variable overrides.
    ///
    /// Environment variables take precedence over the config file. Blank
    /// values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if [`TARGET_REPOSITORY_ENV`]
    /// is not an `owner/repo` name. Nothing is applied in that case.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let repository = non_empty_env(TARGET_REPOSITORY_ENV);
        if let Some(value) = repository.as_ref().filter(|r| !validate_repo_name(r)) {
            return Err(ConfigError::InvalidOverride {
                variable: TARGET_REPOSITORY_ENV,
                value: value.clone(),
                reason: "expected owner/repo",
            });
        }

        if let Some(dir) = non_empty_env(SCENARIOS_DIR_ENV) {
            self.scenarios_dir = PathBuf::from(dir);
        }
        if let Some(repository) = repository {
            self.report.target_repository = repository;
        }
        if let Some(dir) = non_empty_env(OUTPUT_DIR_ENV) {
            self.report.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// `origin` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] for the first problem found.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, message: &'static str| ConfigError::InvalidSetting {
            origin: origin.to_string(),
            key,
            message,
        };

        if self.search.queries.iter().all(|q| q.trim().is_empty()) {
            return Err(invalid("search.queries", "must contain at least one query"));
        }

        if self.search.marker_file_names.is_empty() {
            return Err(invalid("search.marker-file-names", "must not be empty"));
        }

        if self.search.max_pages == 0 {
            return Err(invalid("search.max-pages", "must be at least 1"));
        }

        if self.search.per_page == 0 || self.search.per_page > 100 {
            return Err(invalid("search.per-page", "must be between 1 and 100"));
        }

        if !self.scoring.is_descending() {
            return Err(invalid(
                "scoring",
                "thresholds must satisfy exceptional > high > good",
            ));
        }

        if !validate_repo_name(&self.report.target_repository) {
            return Err(invalid("report.target-repository", "must be in owner/repo format"));
        }

        if self.report.max_issue_body_chars < 1024 {
            return Err(invalid("report.max-issue-body-chars", "must be at least 1024"));
        }

        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
