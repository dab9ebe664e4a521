//! `octocrab`-backed implementation of [`GitHubApi`].

use super::models::{LicenseFileResponse, RepositoryResponse};
use super::{CodeSearchHit, CreatedIssue, FileContent, GitHubApi, GitHubError, RepositoryInfo};
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub client used for real runs.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Octocrab,
}

impl OctocrabClient {
    /// Builds a client, authenticated when a token is given.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError`] if the HTTP client cannot be constructed.
    pub fn new(token: Option<&str>) -> Result<Self, GitHubError> {
        let builder = Octocrab::builder();
        let octocrab = match token {
            Some(token) => builder.personal_token(token.to_string()).build()?,
            None => builder.build()?,
        };
        Ok(Self { octocrab })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    async fn repository_response(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepositoryResponse, GitHubError> {
        let route = format!("/repos/{owner}/{repo}");
        Ok(self
            .octocrab
            .get::<RepositoryResponse, _, ()>(route, None)
            .await?)
    }
}

#[async_trait]
impl GitHubApi for OctocrabClient {
    async fn search_code(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<CodeSearchHit>, GitHubError> {
        debug!(query = %query, page, "Executing code search");
        let results = self
            .octocrab
            .search()
            .code(query)
            .per_page(per_page)
            .page(page)
            .send()
            .await?;

        Ok(results
            .items
            .into_iter()
            .filter_map(|item| {
                let owner = item.repository.owner?.login;
                let name = item.repository.name;
                Some(CodeSearchHit {
                    full_name: format!("{owner}/{name}"),
                    owner,
                    name,
                    path: item.path,
                })
            })
            .collect())
    }

    async fn search_rate_limit(&self) -> Result<RateLimitInfo, GitHubError> {
        let rate_limit = self.octocrab.ratelimit().get().await?;
        let search = &rate_limit.resources.search;

        Ok(RateLimitInfo {
            remaining: u32::try_from(search.remaining).unwrap_or(u32::MAX),
            reset: search.reset,
            limit: u32::try_from(search.limit).unwrap_or(u32::MAX),
        })
    }

    async fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, GitHubError> {
        Ok(self.repository_response(owner, repo).await?.into())
    }

    async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent, GitHubError> {
        let items = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .send()
            .await?;

        let Some(item) = items.items.into_iter().next() else {
            return Err(GitHubError::NotFound {
                resource: format!("{owner}/{repo}/{path}"),
            });
        };

        Ok(FileContent {
            size: u64::try_from(item.size).unwrap_or(0),
            text: item.decoded_content(),
        })
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue, GitHubError> {
        let issue = self
            .octocrab
            .issues(owner, repo)
            .create(title)
            .body(body)
            .labels(labels.to_vec())
            .send()
            .await?;

        Ok(CreatedIssue {
            number: issue.number,
            url: issue.html_url.to_string(),
        })
    }

    async fn repository_license(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, GitHubError> {
        let repository = self.repository_response(owner, repo).await?;
        if let Some(name) = repository.license.as_ref().and_then(|l| l.display_name()) {
            return Ok(Some(name));
        }

        let route = format!("/repos/{owner}/{repo}/license");
        match self.octocrab.get::<LicenseFileResponse, _, ()>(route, None).await {
            Ok(response) => Ok(response.license.and_then(|l| l.display_name())),
            Err(e) => match GitHubError::from(e) {
                GitHubError::NotFound { .. } => Ok(None),
                other => Err(other),
            },
        }
    }
}
