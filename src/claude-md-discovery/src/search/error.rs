//! Candidate validation error types.

use thiserror::Error;

/// Reasons a raw record cannot become a [`Candidate`](super::Candidate).
#[derive(Debug, Error)]
pub enum CandidateError {
    /// A required field is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// The star count is not a non-negative integer.
    #[error("Invalid star count: {value}")]
    InvalidStars { value: String },

    /// The repository URL does not point at GitHub.
    #[error("Invalid GitHub URL: {url}")]
    InvalidUrl { url: String },

    /// The record is not valid JSON.
    #[error("Invalid candidate JSON: {0}")]
    Json(#[from] serde_json::Error),
}
