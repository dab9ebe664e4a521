//! Report error types.

use thiserror::Error;

/// Errors that can occur while rendering or saving a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The report file could not be written.
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The target repository is not in `owner/repo` form.
    #[error("Invalid target repository: {repository}")]
    InvalidTarget { repository: String },
}
