//! License detection for analysis documents.
//!
//! Resolves the repository each scenario document refers to, looks up its
//! license on GitHub and optionally writes a `**License**:` line back.

mod error;
mod extract;

pub use error::LicenseError;
pub use extract::{
    existing_license, extract_repository_url, insert_license_line, parse_github_url,
    LICENSE_PREFIX,
};

use crate::github::{GitHubApi, GitHubError};
use crate::loader::{repo_name_from_dir, SCENARIO_DOCUMENTS};
use crate::rate_limit::{retry_with_backoff, RetryPolicy};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn, Instrument};
use walkdir::WalkDir;

/// License per document path, relative to the scenarios directory.
pub type LicenseResults = BTreeMap<String, Option<String>>;

/// Looks up and records repository licenses.
pub struct LicenseDetector<'a, A: GitHubApi + ?Sized> {
    api: &'a A,
    retry: &'a RetryPolicy,
    cache: HashMap<String, Option<String>>,
}

impl<'a, A: GitHubApi + ?Sized> LicenseDetector<'a, A> {
    /// Creates a detector with an empty cache.
    pub fn new(api: &'a A, retry: &'a RetryPolicy) -> Self {
        Self {
            api,
            retry,
            cache: HashMap::new(),
        }
    }

    /// License of `owner/repo`, cached for the lifetime of the detector.
    ///
    /// Missing repositories and lookup failures resolve to `None`.
    pub async fn repository_license(&mut self, owner: &str, repo: &str) -> Option<String> {
        let key = format!("{owner}/{repo}");
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let api = self.api;
        let result = retry_with_backoff(self.retry, "repository_license", || {
            api.repository_license(owner, repo)
        })
        .await;

        let license = match result {
            Ok(license) => license,
            Err(GitHubError::NotFound { .. }) => {
                warn!(repository = %key, "Repository not found");
                None
            }
            Err(e) => {
                error!(repository = %key, error = %e, "Failed to fetch license");
                None
            }
        };

        self.cache.insert(key, license.clone());
        license
    }

    /// License for one document: an existing license line, else a lookup of
    /// the referenced repository, else of the repository named by its directory.
    pub async fn process_analysis_file(&mut self, path: &Path) -> Option<String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read document");
                return None;
            }
        };

        if let Some(license) = existing_license(&content) {
            debug!(path = %path.display(), license = %license, "License already present");
            return Some(license);
        }

        let url = extract_repository_url(&content).or_else(|| {
            let dir_name = path.parent()?.file_name()?.to_str()?;
            let inferred = format!("https://github.com/{}", repo_name_from_dir(dir_name)?);
            debug!(path = %path.display(), url = %inferred, "Inferred repository from directory");
            Some(inferred)
        });
        let Some(url) = url else {
            warn!(path = %path.display(), "No repository URL found");
            return None;
        };

        let Some((owner, repo)) = parse_github_url(&url) else {
            warn!(url = %url, "Could not parse GitHub URL");
            return None;
        };

        self.repository_license(&owner, &repo).await
    }

    /// Detects licenses for every scenario document under `scenarios_dir`.
    ///
    /// With `update`, documents without a license line get one inserted.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MissingDirectory`] if `scenarios_dir` does not exist.
    pub async fn run(
        &mut self,
        scenarios_dir: &Path,
        update: bool,
    ) -> Result<LicenseResults, LicenseError> {
        if !scenarios_dir.is_dir() {
            return Err(LicenseError::MissingDirectory {
                path: scenarios_dir.display().to_string(),
            });
        }

        let documents = document_files(scenarios_dir);
        let span = info_span!("detect_licenses", documents = documents.len());

        async {
            let mut results = LicenseResults::new();
            for path in documents {
                let relative = path
                    .strip_prefix(scenarios_dir)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/");

                let license = self.process_analysis_file(&path).await;
                if let (Some(license), true) = (&license, update) {
                    if let Err(e) = update_analysis_file(&path, license) {
                        error!(path = %relative, error = %e, "Failed to update document");
                    }
                }
                results.insert(relative, license);
            }

            let found = results.values().filter(|l| l.is_some()).count();
            info!(
                total = results.len(),
                found,
                missing = results.len() - found,
                "License detection complete"
            );
            Ok(results)
        }
        .instrument(span)
        .await
    }
}

/// Inserts a license line into the document at `path`.
///
/// Returns `false` when the document already has one.
///
/// # Errors
///
/// Returns [`LicenseError::Io`] if the document cannot be read or written.
pub fn update_analysis_file(path: &Path, license: &str) -> Result<bool, LicenseError> {
    let io_error = |source| LicenseError::Io {
        path: path.display().to_string(),
        source,
    };

    let content = std::fs::read_to_string(path).map_err(io_error)?;
    let Some(updated) = insert_license_line(&content, license) else {
        return Ok(false);
    };
    std::fs::write(path, updated).map_err(io_error)?;

    info!(path = %path.display(), license = %license, "Added license line");
    Ok(true)
}

/// Writes the results as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`LicenseError`] if serialization or writing fails.
pub fn write_results(results: &LicenseResults, path: &Path) -> Result<(), LicenseError> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json).map_err(|source| LicenseError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Every `README.md` and `analysis.md` at `<category>/<example>/`, sorted.
fn document_files(scenarios_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(scenarios_dir)
        .min_depth(3)
        .max_depth(3)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| SCENARIO_DOCUMENTS.contains(&name))
        })
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_documents_at_example_depth() {
        let temp = TempDir::new().unwrap();
        let example = temp.path().join("getting-started/owner_repo");
        fs::create_dir_all(example.join("nested")).unwrap();
        fs::write(example.join("analysis.md"), "x").unwrap();
        fs::write(example.join("README.md"), "x").unwrap();
        fs::write(example.join("notes.md"), "x").unwrap();
        fs::write(example.join("nested/README.md"), "x").unwrap();
        fs::write(temp.path().join("README.md"), "x").unwrap();

        let files = document_files(temp.path());

        assert_eq!(
            files,
            vec![example.join("README.md"), example.join("analysis.md")]
        );
    }

    #[test]
    fn update_inserts_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("analysis.md");
        fs::write(&path, "# Repo\n**Repository**: https://github.com/a/b\n").unwrap();

        assert!(update_analysis_file(&path, "MIT License").unwrap());
        assert!(!update_analysis_file(&path, "MIT License").unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(LICENSE_PREFIX).count(), 1);
        assert_eq!(existing_license(&content).as_deref(), Some("MIT License"));
    }

    #[test]
    fn writes_results_json() {
        let temp = TempDir::new().unwrap();
        let mut results = LicenseResults::new();
        results.insert("a/b_c/analysis.md".to_string(), Some("MIT License".to_string()));
        results.insert("a/d_e/README.md".to_string(), None);

        let output = temp.path().join("licenses.json");
        write_results(&results, &output).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["a/b_c/analysis.md"], "MIT License");
        assert!(json["a/d_e/README.md"].is_null());
    }
}
