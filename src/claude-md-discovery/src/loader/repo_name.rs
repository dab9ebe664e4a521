//! Repository name validation and parsing.

use regex::Regex;
use std::sync::LazyLock;

static REPOSITORY_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Repository\*\*:\s*(?:\[.*?\]\()?https://github\.com/([^/\)\s]+/[^/\)\s]+)")
        .expect("valid regex")
});

/// Maximum length of a GitHub user or organization login.
const MAX_OWNER_LEN: usize = 39;

/// Maximum length of a GitHub repository name.
const MAX_REPO_LEN: usize = 100;

/// Returns true when `name` is a well-formed `owner/repo` pair.
///
/// The owner must be 1-39 alphanumerics or hyphens, not starting or ending with
/// a hyphen. The repository must be 1-100 alphanumerics, dots, underscores or
/// hyphens.
#[must_use]
pub fn validate_repo_name(name: &str) -> bool {
    let Some((owner, repo)) = name.split_once('/') else {
        return false;
    };

    if repo.contains('/') {
        return false;
    }

    let owner_ok = (1..=MAX_OWNER_LEN).contains(&owner.len())
        && owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !owner.starts_with('-')
        && !owner.ends_with('-');

    let repo_ok = (1..=MAX_REPO_LEN).contains(&repo.len())
        && repo
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    owner_ok && repo_ok
}

/// Extracts `owner/repo` from a `**Repository**: https://github.com/...` line.
///
/// The URL may be wrapped in a Markdown link. The result is not validated.
#[must_use]
pub fn parse_repository_link(content: &str) -> Option<String> {
    REPOSITORY_LINK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Derives `owner/repo` from an `owner_repo` directory name.
///
/// Only the first underscore separates owner and repository, so
/// `gaearon_overreacted.io` and `some_repo_name` both work.
#[must_use]
pub fn repo_name_from_dir(dir_name: &str) -> Option<String> {
    dir_name
        .split_once('_')
        .map(|(owner, repo)| format!("{owner}/{repo}"))
}
