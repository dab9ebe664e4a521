//! License and repository lookups in analysis documents.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Prefix of a license line in an analysis document.
pub const LICENSE_PREFIX: &str = "**License**:";

/// Header lines a license line is placed after.
const ANCHOR_PREFIXES: [&str; 4] = [
    "**CLAUDE.md**:",
    "**Why it's exemplary**:",
    "**Source**:",
    "**Repository**:",
];

static REPOSITORY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"\*\*Repository\*\*:\s*https://github\.com/([^/\s]+/[^/\s]+)",
        r"\*\*Repository:\*\*\s*https://github\.com/([^/\s]+/[^/\s]+)",
        r"\*\*Source\*\*:\s*\[[^\]]+\]\(https://github\.com/([^/\s\)]+/[^/\s\)]+)",
        r"https://github\.com/([^/\s]+/[^/\s\)]+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

static LICENSE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*License\*\*:\s*([^\n]+)").expect("valid regex"));

/// Repository URL (`https://github.com/owner/repo`) referenced by `content`.
///
/// Labelled `**Repository**` and `**Source**` lines are tried before the
/// first bare GitHub URL.
#[must_use]
pub fn extract_repository_url(content: &str) -> Option<String> {
    REPOSITORY_PATTERNS.iter().find_map(|pattern| {
        let path = pattern.captures(content)?.get(1)?.as_str();
        let mut parts = path.split('/');
        let owner = parts.next()?;
        let repo = parts.next()?;
        Some(format!("https://github.com/{owner}/{repo}"))
    })
}

/// Owner and repository of a `github.com` URL.
#[must_use]
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = Url::parse(url).ok()?;
    if url.host_str() != Some("github.com") {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    Some((owner.to_string(), repo.to_string()))
}

/// Value of an existing `**License**:` line.
#[must_use]
pub fn existing_license(content: &str) -> Option<String> {
    if !content.contains(LICENSE_PREFIX) {
        return None;
    }
    LICENSE_LINE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Inserts `**License**: {license}` into `content`.
///
/// The line goes after the first header anchor line, else before the first
/// plain text line among the first ten, else at line 3. Returns `None` when
/// the document already has a license line.
#[must_use]
pub fn insert_license_line(content: &str, license: &str) -> Option<String> {
    if content.contains(LICENSE_PREFIX) {
        return None;
    }

    let license_line = format!("{LICENSE_PREFIX} {license}");
    let mut lines: Vec<&str> = content.split('\n').collect();

    let after_anchor = lines
        .iter()
        .position(|line| ANCHOR_PREFIXES.iter().any(|p| line.starts_with(p)))
        .map(|i| i + 1);
    let before_text = || {
        lines.iter().take(10).position(|line| {
            !line.trim().is_empty() && !line.starts_with('#') && !line.starts_with("**")
        })
    };
    let index = after_anchor
        .or_else(before_text)
        .unwrap_or(3)
        .min(lines.len());

    lines.insert(index, &license_line);
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_repository_urls() {
        let cases = [
            (
                "**Source**: [basicmachines-co/basic-memory](https://github.com/basicmachines-co/basic-memory)\n\
                 **CLAUDE.md**: [View Original](https://github.com/basicmachines-co/basic-memory/blob/main/CLAUDE.md)",
                "https://github.com/basicmachines-co/basic-memory",
            ),
            (
                "**Repository:** https://github.com/platformatic/platformatic\n\
                 **CLAUDE.md File:** https://github.com/platformatic/platformatic/blob/main/CLAUDE.md",
                "https://github.com/platformatic/platformatic",
            ),
            (
                "**Repository**: https://github.com/cloudflare/workers-sdk\n\
                 **Why it's exemplary**: Demonstrates masterful monorepo",
                "https://github.com/cloudflare/workers-sdk",
            ),
            (
                "See https://github.com/astral-sh/uv/blob/main/CLAUDE.md",
                "https://github.com/astral-sh/uv",
            ),
        ];

        for (content, expected) in cases {
            assert_eq!(extract_repository_url(content).as_deref(), Some(expected));
        }
        assert_eq!(extract_repository_url("no links"), None);
    }

    #[test]
    fn parses_github_urls_only() {
        assert_eq!(
            parse_github_url("https://github.com/gaearon/overreacted.io"),
            Some(("gaearon".to_string(), "overreacted.io".to_string()))
        );
        assert_eq!(parse_github_url("https://gitlab.com/a/b"), None);
        assert_eq!(parse_github_url("https://github.com/only-owner"), None);
        assert_eq!(parse_github_url("not a url"), None);
    }

    #[test]
    fn reads_existing_license() {
        assert_eq!(
            existing_license("# X\n**License**: MIT License \n").as_deref(),
            Some("MIT License")
        );
        assert_eq!(existing_license("# X\n"), None);
    }

    #[test]
    fn inserts_after_anchor_line() {
        let content = "# Title\n\n**Category**: Tools\n**Repository**: https://github.com/a/b\n\nBody";
        let updated = insert_license_line(content, "MIT License").unwrap();
        let lines: Vec<_> = updated.lines().collect();

        assert_eq!(lines[3], "**Repository**: https://github.com/a/b");
        assert_eq!(lines[4], "**License**: MIT License");
    }

    #[test]
    fn inserts_before_first_text_line() {
        let content = "# Title\n\nFirst paragraph.\nMore.";
        let updated = insert_license_line(content, "Apache License 2.0").unwrap();

        assert_eq!(
            updated,
            "# Title\n\n**License**: Apache License 2.0\nFirst paragraph.\nMore."
        );
    }

    #[test]
    fn falls_back_to_line_three() {
        let content = "# Title\n\n## Section\n## Other";
        let updated = insert_license_line(content, "MIT").unwrap();
        assert_eq!(updated.lines().nth(3), Some("**License**: MIT"));

        let short = "# Title";
        assert_eq!(insert_license_line(short, "MIT").unwrap(), "# Title\n**License**: MIT");
    }

    #[test]
    fn existing_license_line_is_kept() {
        assert_eq!(insert_license_line("**License**: MIT\n", "Apache"), None);
    }
}
