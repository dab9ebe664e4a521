//! Access to the GitHub API.
//!
//! Every external call made by discovery goes through the [`GitHubApi`] trait.
//! [`OctocrabClient`] implements it on top of `octocrab`; tests substitute an
//! in-memory fake.

mod client;
mod error;
mod models;

pub use client::OctocrabClient;
pub use error::GitHubError;
pub use models::{CodeSearchHit, CreatedIssue, FileContent, RepositoryInfo};

use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;

/// Operations discovery needs from GitHub.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Runs one page of a code search.
    async fn search_code(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<CodeSearchHit>, GitHubError>;

    /// Current state of the search rate limit.
    async fn search_rate_limit(&self) -> Result<RateLimitInfo, GitHubError>;

    /// Fetches repository metadata.
    async fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, GitHubError>;

    /// Fetches a file from the default branch.
    async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent, GitHubError>;

    /// Opens an issue.
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue, GitHubError>;

    /// License name of a repository, `None` when it has none.
    async fn repository_license(&self, owner: &str, repo: &str)
        -> Result<Option<String>, GitHubError>;
}
