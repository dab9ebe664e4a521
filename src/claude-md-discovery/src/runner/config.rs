//! Runner configuration.

use crate::config::DiscoveryConfig;

/// Configuration for a discovery run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Resolved discovery settings.
    settings: DiscoveryConfig,
    /// GitHub token used for API calls.
    token: String,
    /// Whether to skip issue creation.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(settings: DiscoveryConfig, token: String, dry_run: bool) -> Self {
        Self {
            settings,
            token,
            dry_run,
        }
    }

    /// Returns the discovery settings.
    pub fn settings(&self) -> &DiscoveryConfig {
        &self.settings
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
