//! Consistency checks for the curated examples.
//!
//! Every `scenarios/<category>/<example>/` directory must carry a document,
//! link its repository, and be named after that repository. A missing
//! CLAUDE.md link is reported as a warning only.

mod error;
mod links;

pub use error::VerifyError;
pub use links::{extract_github_links, GitHubLinks, RepositoryLink};

use crate::loader::{scenario_dirs, ScenarioDir};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Default output file for the verification results.
pub const DEFAULT_OUTPUT: &str = "verification_results.json";

/// How serious a finding is. Only errors fail an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding for an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "❌ {}", self.message),
            Severity::Warning => write!(f, "⚠️  {}", self.message),
        }
    }
}

/// Findings for one example directory.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleIssues {
    pub path: String,
    pub category: String,
    pub issues: Vec<Finding>,
}

impl ExampleIssues {
    /// Returns `true` if any finding is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

/// Outcome of a verification run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationResults {
    pub total: usize,

    /// Examples without error findings. Warnings alone do not fail an example.
    pub passed: usize,

    /// Examples with at least one error finding.
    pub failed: usize,

    /// Examples with at least one finding, including warning-only ones.
    pub issues: Vec<ExampleIssues>,
}

impl VerificationResults {
    /// Returns `true` if any example failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Checks a single example directory.
#[must_use]
pub fn verify_example(dir: &ScenarioDir) -> Vec<Finding> {
    let Some(document) = dir.document() else {
        return vec![Finding::error("Missing README.md or analysis.md")];
    };
    let content = match std::fs::read_to_string(&document) {
        Ok(content) => content,
        Err(e) => {
            return vec![Finding::error(format!(
                "Failed to read {}: {e}",
                document.display()
            ))];
        }
    };

    let mut findings = Vec::new();
    let links = extract_github_links(&content);

    if links.claude_md_url.is_none() {
        findings.push(Finding::warning("No CLAUDE.md link found (may be optional)"));
    }

    match links.repository {
        None => findings.push(Finding::error("No GitHub repository link found")),
        Some(repository) => {
            let expected = repository.expected_dir_name();
            if expected != dir.name {
                findings.push(Finding::error(format!(
                    "Directory name mismatch: Expected: {expected}, Got: {}",
                    dir.name
                )));
            }
        }
    }

    findings
}

/// Verifies every example under `scenarios_dir`.
///
/// An example counts as failed only when it has an error finding. One whose
/// only finding is the missing CLAUDE.md link warning counts as passed but is
/// still listed in [`VerificationResults::issues`].
///
/// # Errors
///
/// Returns [`VerifyError::MissingDirectory`] if `scenarios_dir` does not exist.
pub fn verify_examples(scenarios_dir: &Path) -> Result<VerificationResults, VerifyError> {
    if !scenarios_dir.is_dir() {
        return Err(VerifyError::MissingDirectory {
            path: scenarios_dir.display().to_string(),
        });
    }

    let dirs = scenario_dirs(scenarios_dir);
    let mut results = VerificationResults {
        total: dirs.len(),
        ..VerificationResults::default()
    };

    for dir in &dirs {
        let findings = verify_example(dir);
        let example = ExampleIssues {
            path: dir.path.display().to_string(),
            category: dir.category.clone(),
            issues: findings,
        };

        if example.has_errors() {
            results.failed += 1;
            warn!(path = %example.path, issues = example.issues.len(), "Example failed verification");
        } else {
            results.passed += 1;
        }

        if !example.issues.is_empty() {
            results.issues.push(example);
        }
    }

    info!(
        total = results.total,
        passed = results.passed,
        failed = results.failed,
        "Verification complete"
    );
    Ok(results)
}

/// Writes the results as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`VerifyError`] if serialization or writing fails.
pub fn write_results(results: &VerificationResults, path: &Path) -> Result<(), VerifyError> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json).map_err(|source| VerifyError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn example(root: &Path, category: &str, name: &str, content: Option<&str>) {
        let dir = root.join(category).join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = content {
            fs::write(dir.join("README.md"), content).unwrap();
        }
    }

    #[test]
    fn classifies_examples() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        example(
            root,
            "developer-tooling",
            "astral-sh_uv",
            Some("[Repository](https://github.com/astral-sh/uv)\n[CLAUDE.md](https://github.com/astral-sh/uv/blob/main/CLAUDE.md)\n"),
        );
        example(
            root,
            "developer-tooling",
            "zed-industries_zed",
            Some("[Repository](https://github.com/zed-industries/zed)\n"),
        );
        example(
            root,
            "complex-projects",
            "wrong_name",
            Some("[Repository](https://github.com/microsoft/vscode)\n"),
        );
        example(root, "getting-started", "empty_example", None);

        let results = verify_examples(root).unwrap();

        assert_eq!(results.total, 4);
        assert_eq!(results.passed, 2);
        assert_eq!(results.failed, 2);
        assert!(results.has_failures());
        assert_eq!(results.issues.len(), 3);

        let mismatch = results
            .issues
            .iter()
            .find(|i| i.path.ends_with("wrong_name"))
            .unwrap();
        assert!(mismatch.has_errors());
        assert!(mismatch
            .issues
            .iter()
            .any(|f| f.message.contains("Expected: microsoft_vscode, Got: wrong_name")));

        let warning_only = results
            .issues
            .iter()
            .find(|i| i.path.ends_with("zed-industries_zed"))
            .unwrap();
        assert!(!warning_only.has_errors());
    }

    #[test]
    fn missing_claude_md_link_is_only_a_warning() {
        let temp = TempDir::new().unwrap();
        example(
            temp.path(),
            "developer-tooling",
            "zed-industries_zed",
            Some("[Repository](https://github.com/zed-industries/zed)\n"),
        );

        let results = verify_examples(temp.path()).unwrap();

        assert_eq!((results.passed, results.failed), (1, 0));
        assert!(!results.has_failures());
        assert_eq!(results.issues.len(), 1);
        assert_eq!(results.issues[0].issues[0].severity, Severity::Warning);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            verify_examples(&temp.path().join("scenarios")),
            Err(VerifyError::MissingDirectory { .. })
        ));
    }

    #[test]
    fn writes_json() {
        let temp = TempDir::new().unwrap();
        example(temp.path(), "getting-started", "empty_example", None);
        let results = verify_examples(temp.path()).unwrap();

        let output = temp.path().join(DEFAULT_OUTPUT);
        write_results(&results, &output).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["issues"][0]["issues"][0]["severity"], "error");
    }
}
