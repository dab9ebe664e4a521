//! GitHub API error types.

use thiserror::Error;

/// Errors returned by [`GitHubApi`](super::GitHubApi) calls.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The repository, file or endpoint does not exist.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The API refused the call because the rate limit is exhausted.
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Any other API or network failure.
    #[error("GitHub API error: {0}")]
    Api(String),

    /// Unclassified octocrab error.
    #[error("GitHub API error: {0}")]
    Octocrab(#[source] octocrab::Error),
}

impl GitHubError {
    /// Whether the call may succeed if repeated later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

impl GitHubError {
    /// Classifies an API error response by status code.
    ///
    /// 404 is [`GitHubError::NotFound`]. 429, and 403 with a rate-limit
    /// message, are [`GitHubError::RateLimited`]. Anything else is `None`.
    #[must_use]
    pub fn from_status(status: u16, message: &str) -> Option<Self> {
        match status {
            404 => Some(Self::NotFound {
                resource: message.to_string(),
            }),
            429 => Some(Self::RateLimited {
                message: message.to_string(),
            }),
            403 if message.to_lowercase().contains("rate limit") => Some(Self::RateLimited {
                message: message.to_string(),
            }),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for GitHubError {
    fn from(error: octocrab::Error) -> Self {
        if let octocrab::Error::GitHub { source, .. } = &error {
            let status = source.status_code.as_u16();
            if let Some(classified) = Self::from_status(status, &source.message) {
                return classified;
            }
        }
        Self::Octocrab(error)
    }
}
