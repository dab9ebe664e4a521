//! GitHub link extraction from example documents.

use regex::Regex;
use std::sync::LazyLock;

static REPOSITORY_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:Repository|Source)\]\((https://github\.com/([^/]+)/([^/\)]+))\)")
        .expect("valid regex")
});

static ANY_REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([^/\s]+)/([^/\s\)]+)").expect("valid regex")
});

static CLAUDE_MD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[CLAUDE\.md\]\((https://github\.com/[^/]+/[^/]+/blob/[^\)]+/CLAUDE\.md)\)")
        .expect("valid regex")
});

static CLAUDE_MD_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/[^/]+/[^/]+/blob/[^/\s]+/CLAUDE\.md").expect("valid regex")
});

/// Repository coordinates found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLink {
    pub url: String,
    pub owner: String,
    pub repo: String,
}

impl RepositoryLink {
    /// Directory name an example for this repository is expected to use.
    #[must_use]
    pub fn expected_dir_name(&self) -> String {
        format!("{}_{}", self.owner, self.repo)
    }
}

/// Links extracted from one example document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitHubLinks {
    pub repository: Option<RepositoryLink>,
    pub claude_md_url: Option<String>,
}

/// Extracts the repository link and the CLAUDE.md link from `content`.
///
/// A `[Repository](...)` or `[Source](...)` link wins over the first bare
/// GitHub URL. A `[CLAUDE.md](...)` link wins over a bare `blob/.../CLAUDE.md` URL.
#[must_use]
pub fn extract_github_links(content: &str) -> GitHubLinks {
    let repository = REPOSITORY_LINK
        .captures(content)
        .map(|caps| RepositoryLink {
            url: caps[1].to_string(),
            owner: caps[2].to_string(),
            repo: caps[3].to_string(),
        })
        .or_else(|| {
            ANY_REPOSITORY_URL.captures(content).map(|caps| RepositoryLink {
                url: format!("https://github.com/{}/{}", &caps[1], &caps[2]),
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            })
        });

    let claude_md_url = CLAUDE_MD_LINK
        .captures(content)
        .map(|caps| caps[1].to_string())
        .or_else(|| CLAUDE_MD_URL.find(content).map(|m| m.as_str().to_string()));

    GitHubLinks {
        repository,
        claude_md_url,
    }
}
