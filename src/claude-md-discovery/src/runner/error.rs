//! Runner error types.

/// Errors that can occur before a discovery run starts.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    GitHub(#[from] crate::github::GitHubError),

    /// No GitHub token was provided.
    #[error("A GitHub token is required")]
    MissingToken,
}
