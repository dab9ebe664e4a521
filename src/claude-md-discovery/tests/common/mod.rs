#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use claude_md_discovery::github::{CodeSearchHit, CreatedIssue, FileContent, RepositoryInfo};
use claude_md_discovery::{DiscoveryConfig, GitHubApi, GitHubError, RateLimitInfo, RetryPolicy};
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use std::sync::Mutex;

/// Kind of transient error injected into [`FakeGitHub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    RateLimited,
    Api,
}

impl Failure {
    fn error(self) -> GitHubError {
        match self {
            Self::RateLimited => GitHubError::RateLimited {
                message: "API rate limit exceeded".to_string(),
            },
            Self::Api => GitHubError::Api("502 Bad Gateway".to_string()),
        }
    }
}

/// Fails the calls whose zero-based index falls in `calls`.
#[derive(Debug, Clone)]
struct FailureRule {
    failure: Failure,
    calls: Range<usize>,
}

/// Counts a call under `key` and returns the injected error for it, if any.
fn next_call<K: std::hash::Hash + Eq + Clone>(
    counters: &mut HashMap<K, usize>,
    rules: &HashMap<K, FailureRule>,
    key: &K,
) -> Option<GitHubError> {
    let counter = counters.entry(key.clone()).or_default();
    let index = *counter;
    *counter += 1;
    rules
        .get(key)
        .filter(|rule| rule.calls.contains(&index))
        .map(|rule| rule.failure.error())
}

/// An issue recorded by [`FakeGitHub::create_issue`].
#[derive(Debug, Clone)]
pub struct RecordedIssue {
    pub repository: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

#[derive(Default)]
struct State {
    search_pages: HashMap<(String, u32), Vec<CodeSearchHit>>,
    repositories: HashMap<String, RepositoryInfo>,
    files: HashMap<(String, String), String>,
    binary_files: HashMap<(String, String), u64>,
    search_failures: HashMap<String, Failure>,
    rate_limit_failure: Option<Failure>,
    repository_failures: HashMap<String, FailureRule>,
    file_failures: HashMap<(String, String), FailureRule>,
    repository_calls: HashMap<String, usize>,
    file_calls: HashMap<(String, String), usize>,
    licenses: HashMap<String, Option<String>>,
    issues: Vec<RecordedIssue>,
    fail_issue_creation: bool,
    license_calls: usize,
}

/// In-memory GitHub used by the integration tests.
#[derive(Default)]
pub struct FakeGitHub {
    state: Mutex<State>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_hit(self, query: &str, page: u32, full_name: &str, path: &str) -> Self {
        let (owner, name) = full_name.split_once('/').unwrap();
        self.state
            .lock()
            .unwrap()
            .search_pages
            .entry((query.to_string(), page))
            .or_default()
            .push(CodeSearchHit {
                owner: owner.to_string(),
                name: name.to_string(),
                full_name: full_name.to_string(),
                path: path.to_string(),
            });
        self
    }

    pub fn with_repository(self, info: RepositoryInfo) -> Self {
        self.state
            .lock()
            .unwrap()
            .repositories
            .insert(info.full_name.clone(), info);
        self
    }

    pub fn with_file(self, full_name: &str, path: &str, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert((full_name.to_string(), path.to_string()), content.to_string());
        self
    }

    pub fn with_license(self, full_name: &str, license: Option<&str>) -> Self {
        self.state
            .lock()
            .unwrap()
            .licenses
            .insert(full_name.to_string(), license.map(String::from));
        self
    }

    /// A marker file whose content is not valid UTF-8.
    pub fn with_binary_file(self, full_name: &str, path: &str, size: u64) -> Self {
        self.state
            .lock()
            .unwrap()
            .binary_files
            .insert((full_name.to_string(), path.to_string()), size);
        self
    }

    /// Every page of `query` fails.
    pub fn failing_search(self, query: &str, failure: Failure) -> Self {
        self.state
            .lock()
            .unwrap()
            .search_failures
            .insert(query.to_string(), failure);
        self
    }

    pub fn failing_rate_limit(self, failure: Failure) -> Self {
        self.state.lock().unwrap().rate_limit_failure = Some(failure);
        self
    }

    /// Repository lookups of `full_name` numbered within `calls` fail.
    pub fn failing_repository(self, full_name: &str, failure: Failure, calls: Range<usize>) -> Self {
        self.state
            .lock()
            .unwrap()
            .repository_failures
            .insert(full_name.to_string(), FailureRule { failure, calls });
        self
    }

    /// Fetches of `full_name:path` numbered within `calls` fail.
    pub fn failing_file(
        self,
        full_name: &str,
        path: &str,
        failure: Failure,
        calls: Range<usize>,
    ) -> Self {
        self.state.lock().unwrap().file_failures.insert(
            (full_name.to_string(), path.to_string()),
            FailureRule { failure, calls },
        );
        self
    }

    pub fn repository_calls(&self, full_name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .repository_calls
            .get(full_name)
            .copied()
            .unwrap_or_default()
    }

    pub fn failing_issue_creation(self) -> Self {
        self.state.lock().unwrap().fail_issue_creation = true;
        self
    }

    pub fn issues(&self) -> Vec<RecordedIssue> {
        self.state.lock().unwrap().issues.clone()
    }

    pub fn license_calls(&self) -> usize {
        self.state.lock().unwrap().license_calls
    }
}

fn not_found(resource: String) -> GitHubError {
    GitHubError::NotFound { resource }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn search_code(
        &self,
        query: &str,
        page: u32,
        _per_page: u8,
    ) -> Result<Vec<CodeSearchHit>, GitHubError> {
        let state = self.state.lock().unwrap();
        if let Some(failure) = state.search_failures.get(query) {
            return Err(failure.error());
        }
        Ok(state
            .search_pages
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_default())
    }

    async fn search_rate_limit(&self) -> Result<RateLimitInfo, GitHubError> {
        if let Some(failure) = self.state.lock().unwrap().rate_limit_failure {
            return Err(failure.error());
        }
        Ok(RateLimitInfo {
            remaining: 30,
            reset: 0,
            limit: 30,
        })
    }

    async fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, GitHubError> {
        let full_name = format!("{owner}/{repo}");
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        if let Some(error) =
            next_call(&mut state.repository_calls, &state.repository_failures, &full_name)
        {
            return Err(error);
        }
        state
            .repositories
            .get(&full_name)
            .cloned()
            .ok_or_else(|| not_found(full_name))
    }

    async fn file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<FileContent, GitHubError> {
        let key = (format!("{owner}/{repo}"), path.to_string());
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        if let Some(error) = next_call(&mut state.file_calls, &state.file_failures, &key) {
            return Err(error);
        }
        if let Some(&size) = state.binary_files.get(&key) {
            return Ok(FileContent { size, text: None });
        }
        state
            .files
            .get(&key)
            .map(|text| FileContent {
                size: text.len() as u64,
                text: Some(text.clone()),
            })
            .ok_or_else(|| not_found(format!("{}/{}", key.0, key.1)))
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue, GitHubError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_issue_creation {
            return Err(GitHubError::Api("issue creation disabled".to_string()));
        }
        state.issues.push(RecordedIssue {
            repository: format!("{owner}/{repo}"),
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.to_vec(),
        });
        let number = state.issues.len() as u64;
        Ok(CreatedIssue {
            number,
            url: format!("https://github.com/{owner}/{repo}/issues/{number}"),
        })
    }

    async fn repository_license(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, GitHubError> {
        let full_name = format!("{owner}/{repo}");
        let mut state = self.state.lock().unwrap();
        state.license_calls += 1;
        state
            .licenses
            .get(&full_name)
            .cloned()
            .ok_or_else(|| not_found(full_name))
    }
}

/// Repository metadata updated three days ago.
pub fn repository(full_name: &str, stars: u64) -> RepositoryInfo {
    let (owner, name) = full_name.split_once('/').unwrap();
    RepositoryInfo {
        full_name: full_name.to_string(),
        name: name.to_string(),
        owner: owner.to_string(),
        organization: None,
        description: Some("Test repository".to_string()),
        stars,
        language: None,
        topics: Vec::new(),
        html_url: format!("https://github.com/{full_name}"),
        created_at: Some(Utc::now() - Duration::days(400)),
        updated_at: Some(Utc::now() - Duration::days(3)),
        archived: false,
        fork: false,
    }
}

/// A marker file of at least 500 bytes with architecture and command sections.
pub fn marker_content() -> String {
    let mut content = String::from(
        "# Project Guide\n\n## Architecture\n\nThe service is split into small modules.\n\n\
         ## Development Commands\n\n```bash\nmake test\n```\n\n",
    );
    while content.len() < 600 {
        content.push_str("Keep modules small and focused on one concern.\n");
    }
    content
}

/// Writes `scenarios/<category>/<dir>/README.md` under `root`.
pub fn write_scenario(root: &Path, category: &str, dir: &str, content: &str) {
    let path = root.join("scenarios").join(category).join(dir);
    std::fs::create_dir_all(&path).unwrap();
    std::fs::write(path.join("README.md"), content).unwrap();
}

/// Settings that never sleep, rooted at `root`.
pub fn test_config(root: &Path) -> DiscoveryConfig {
    let mut config = DiscoveryConfig {
        scenarios_dir: root.join("scenarios"),
        retry: RetryPolicy::immediate(0),
        ..DiscoveryConfig::default()
    };
    config.search.page_delay_ms = 0;
    config.search.max_pages = 2;
    config.report.output_dir = root.to_path_buf();
    config
}
