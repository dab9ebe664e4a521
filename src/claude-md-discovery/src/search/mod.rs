//! Candidate discovery using GitHub Code Search.
//!
//! Runs every configured query, pages through the results and turns each new
//! repository hit into a validated [`Candidate`].

mod candidate;
mod error;
mod settings;

pub use candidate::{Candidate, RawCandidate};
pub use error::CandidateError;
pub use settings::SearchSettings;

use crate::github::{CodeSearchHit, GitHubApi, GitHubError};
use crate::rate_limit::{retry_with_backoff, wait_if_needed, RateLimitPolicy, RetryPolicy};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Searches GitHub for repositories with a CLAUDE.md worth evaluating.
pub struct GitHubSearcher<'a, A: GitHubApi + ?Sized> {
    api: &'a A,
    settings: &'a SearchSettings,
    retry: &'a RetryPolicy,
    rate_limit: &'a RateLimitPolicy,
}

impl<'a, A: GitHubApi + ?Sized> GitHubSearcher<'a, A> {
    /// Creates a searcher.
    pub fn new(
        api: &'a A,
        settings: &'a SearchSettings,
        retry: &'a RetryPolicy,
        rate_limit: &'a RateLimitPolicy,
    ) -> Self {
        Self {
            api,
            settings,
            retry,
            rate_limit,
        }
    }

    /// Runs all queries and returns the candidates found, deduplicated by name.
    ///
    /// Repositories in `existing` are skipped, as are archived and forked ones
    /// and those without a marker file of at least the configured size. Errors
    /// end the current query but never the search.
    pub async fn search_github_repos(&self, existing: &HashSet<String>) -> Vec<Candidate> {
        let span = info_span!("search", queries = self.settings.queries.len());

        async {
            info!("Starting GitHub repository search");
            let mut seen = HashSet::new();
            let mut candidates = Vec::new();

            for query in &self.settings.queries {
                info!(query = %query, "Searching");
                let before = candidates.len();
                self.search_query(query, existing, &mut seen, &mut candidates)
                    .await;
                debug!(query = %query, found = candidates.len() - before, "Query complete");
            }

            info!(count = candidates.len(), "Search complete");
            candidates
        }
        .instrument(span)
        .await
    }

    async fn search_query(
        &self,
        query: &str,
        existing: &HashSet<String>,
        seen: &mut HashSet<String>,
        candidates: &mut Vec<Candidate>,
    ) {
        for page in 1..=self.settings.max_pages {
            if page > 1 {
                tokio::time::sleep(Duration::from_millis(self.settings.page_delay_ms)).await;
            }
            self.respect_rate_limit().await;

            let per_page = self.settings.per_page;
            let hits = match retry_with_backoff(self.retry, "search_code", || {
                self.api.search_code(query, page, per_page)
            })
            .await
            {
                Ok(hits) => hits,
                Err(e) => {
                    error!(query = %query, page, error = %e, "Search failed, skipping query");
                    return;
                }
            };

            if hits.is_empty() {
                debug!(query = %query, page, "No more results");
                return;
            }

            for hit in hits {
                if seen.contains(&hit.full_name) {
                    continue;
                }
                if existing.contains(&hit.full_name) {
                    debug!(repo = %hit.full_name, "Skipping existing repository");
                    seen.insert(hit.full_name);
                    continue;
                }

                // Transient failures leave the repository unseen so a later query can retry it.
                match self.inspect(&hit).await {
                    Ok(candidate) => {
                        seen.insert(hit.full_name.clone());
                        if let Some(candidate) = candidate {
                            info!(
                                repo = %candidate.full_name,
                                stars = candidate.stars,
                                "Found candidate"
                            );
                            candidates.push(candidate);
                        }
                    }
                    Err(e) => {
                        warn!(repo = %hit.full_name, error = %e, "Failed to inspect repository");
                    }
                }
            }
        }
    }

    async fn respect_rate_limit(&self) {
        match self.api.search_rate_limit().await {
            Ok(info) => {
                wait_if_needed(&info, self.rate_limit).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to check search rate limit");
            }
        }
    }

    /// Turns a search hit into a candidate.
    ///
    /// `Ok(None)` means the repository does not qualify. Errors are transient
    /// failures that outlasted the retry budget.
    async fn inspect(&self, hit: &CodeSearchHit) -> Result<Option<Candidate>, GitHubError> {
        let repository = match retry_with_backoff(self.retry, "repository", || {
            self.api.repository(&hit.owner, &hit.name)
        })
        .await
        {
            Ok(repository) => repository,
            Err(GitHubError::NotFound { .. }) => {
                debug!(repo = %hit.full_name, "Repository no longer exists");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if repository.archived || repository.fork {
            debug!(repo = %hit.full_name, "Skipping archived or forked repository");
            return Ok(None);
        }

        let Some(marker) = self.find_marker_file(hit).await? else {
            return Ok(None);
        };

        match Candidate::try_from(RawCandidate::from_repository(repository, marker)) {
            Ok(candidate) => Ok(Some(candidate)),
            Err(e) => {
                warn!(repo = %hit.full_name, error = %e, "Invalid candidate");
                Ok(None)
            }
        }
    }

    /// First marker casing at the repository root that is large enough.
    ///
    /// Fails only when no casing qualified and at least one lookup hit a
    /// transient error.
    async fn find_marker_file(&self, hit: &CodeSearchHit) -> Result<Option<String>, GitHubError> {
        let mut transient = None;

        for path in &self.settings.marker_file_names {
            let result = retry_with_backoff(self.retry, "file_content", || {
                self.api.file_content(&hit.owner, &hit.name, path)
            })
            .await;

            match result {
                Ok(file) if file.size >= self.settings.min_file_size => {
                    return Ok(Some(path.clone()));
                }
                Ok(file) => {
                    debug!(
                        repo = %hit.full_name,
                        path = %path,
                        size = file.size,
                        "Marker file too small"
                    );
                }
                Err(GitHubError::NotFound { .. }) => {}
                Err(e) => {
                    warn!(repo = %hit.full_name, path = %path, error = %e, "Could not fetch marker file");
                    transient = Some(e);
                }
            }
        }

        match transient {
            Some(e) => Err(e),
            None => {
                debug!(repo = %hit.full_name, "No qualifying marker file");
                Ok(None)
            }
        }
    }
}
