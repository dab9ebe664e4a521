//! Data returned by the GitHub API, reduced to what discovery needs.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One hit of a code search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSearchHit {
    /// Repository owner login.
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Path of the matched file inside the repository.
    pub path: String,
}

/// Repository metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub name: String,
    pub owner: String,

    /// Owning organization login, when the owner is an organization.
    pub organization: Option<String>,

    pub description: Option<String>,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub archived: bool,
    pub fork: bool,
}

/// A file fetched through the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Size in bytes as reported by GitHub.
    pub size: u64,

    /// Decoded text, `None` when the file is not valid UTF-8 or too large to inline.
    pub text: Option<String>,
}

/// An issue that was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub number: u64,
    pub url: String,
}

/// Raw `/repos/{owner}/{repo}` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryResponse {
    pub full_name: String,
    pub name: String,
    pub owner: AccountResponse,
    #[serde(default)]
    pub organization: Option<AccountResponse>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub html_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub license: Option<LicenseResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LicenseResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// Raw `/repos/{owner}/{repo}/license` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct LicenseFileResponse {
    #[serde(default)]
    pub license: Option<LicenseResponse>,
}

impl LicenseResponse {
    /// Human readable license name; `NOASSERTION` counts as no license.
    pub(crate) fn display_name(&self) -> Option<String> {
        if self.spdx_id.as_deref() == Some("NOASSERTION") {
            return None;
        }
        self.name.clone().or_else(|| self.spdx_id.clone())
    }
}

impl From<RepositoryResponse> for RepositoryInfo {
    fn from(response: RepositoryResponse) -> Self {
        let organization = response.organization.map(|org| org.login).or_else(|| {
            (response.owner.kind.as_deref() == Some("Organization"))
                .then(|| response.owner.login.clone())
        });

        Self {
            full_name: response.full_name,
            name: response.name,
            owner: response.owner.login,
            organization,
            description: response.description,
            stars: response.stargazers_count,
            language: response.language,
            topics: response.topics,
            html_url: response.html_url,
            created_at: response.created_at,
            updated_at: response.updated_at,
            archived: response.archived,
            fork: response.fork,
        }
    }
}
