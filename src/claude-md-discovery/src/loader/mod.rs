//! Loading of repositories already curated in the scenarios tree.
//!
//! The tree looks like:
//! ```text
//! scenarios/
//! ├── developer-tooling/
//! │   └── owner_repo/
//! │       └── README.md   (contains "**Repository**: https://github.com/owner/repo")
//! ```

mod layout;
mod repo_name;

pub use layout::{scenario_dirs, scenario_document, ScenarioDir, SCENARIO_DOCUMENTS};
pub use repo_name::{parse_repository_link, repo_name_from_dir, validate_repo_name};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Builds the set of repositories that are already part of the collection.
#[derive(Debug, Clone)]
pub struct RepositoryLoader {
    scenarios_dir: PathBuf,
}

impl RepositoryLoader {
    /// Creates a loader for the given scenarios directory.
    pub fn new(scenarios_dir: impl Into<PathBuf>) -> Self {
        Self {
            scenarios_dir: scenarios_dir.into(),
        }
    }

    /// Returns the scenarios directory.
    pub fn scenarios_dir(&self) -> &Path {
        &self.scenarios_dir
    }

    /// Collects `owner/repo` names from every `<category>/<owner_repo>/` directory.
    ///
    /// The repository link in the analysis document wins over the directory
    /// name. Directories without an underscore are ignored and invalid names
    /// are logged and skipped. A missing scenarios directory yields an empty set.
    pub fn load_existing_repos(&self) -> HashSet<String> {
        if !self.scenarios_dir.is_dir() {
            info!(
                path = %self.scenarios_dir.display(),
                "Scenarios directory not found, assuming no existing repositories"
            );
            return HashSet::new();
        }

        let mut existing = HashSet::new();
        for dir in scenario_dirs(&self.scenarios_dir) {
            if !dir.name.contains('_') {
                debug!(dir = %dir.name, "Skipping directory without owner_repo name");
                continue;
            }

            match repo_name_for(&dir) {
                Some(name) => {
                    debug!(repo = %name, "Found existing repository");
                    existing.insert(name);
                }
                None => {
                    warn!(
                        path = %dir.path.display(),
                        "Could not determine a valid repository name"
                    );
                }
            }
        }

        info!(count = existing.len(), "Loaded existing repositories");
        existing
    }
}

/// Name from the document link when valid, else from the directory name.
fn repo_name_for(dir: &ScenarioDir) -> Option<String> {
    let from_document = dir
        .document()
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read analysis document");
                None
            }
        })
        .and_then(|content| parse_repository_link(&content));

    if let Some(name) = from_document {
        if validate_repo_name(&name) {
            return Some(name);
        }
        warn!(repo = %name, dir = %dir.name, "Invalid repository link, using directory name");
    }

    repo_name_from_dir(&dir.name).filter(|name| validate_repo_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scenario(root: &Path, category: &str, dir: &str, readme: Option<&str>) {
        let path = root.join(category).join(dir);
        fs::create_dir_all(&path).unwrap();
        if let Some(content) = readme {
            fs::write(path.join("README.md"), content).unwrap();
        }
    }

    #[test]
    fn loads_names_from_links_and_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        scenario(
            root,
            "complex-projects",
            "microsoft_semanticworkbench",
            Some("# Semantic Workbench\n\n**Repository**: https://github.com/microsoft/semanticworkbench\n"),
        );
        scenario(root, "developer-tooling", "zed-industries_zed", None);
        scenario(
            root,
            "getting-started",
            "renamed_dir",
            Some("**Repository**: [Actual](https://github.com/actual-owner/actual-repo)"),
        );

        let existing = RepositoryLoader::new(root).load_existing_repos();

        assert_eq!(existing.len(), 3);
        assert!(existing.contains("microsoft/semanticworkbench"));
        assert!(existing.contains("zed-industries/zed"));
        assert!(existing.contains("actual-owner/actual-repo"));
    }

    #[test]
    fn ignores_directories_without_underscore() {
        let temp = TempDir::new().unwrap();
        scenario(temp.path(), "developer-tooling", "templates", None);

        assert!(RepositoryLoader::new(temp.path())
            .load_existing_repos()
            .is_empty());
    }

    #[test]
    fn invalid_link_falls_back_to_directory_name() {
        let temp = TempDir::new().unwrap();
        scenario(
            temp.path(),
            "developer-tooling",
            "owner_repo",
            Some("**Repository**: https://github.com/-bad-/repo"),
        );

        let existing = RepositoryLoader::new(temp.path()).load_existing_repos();
        assert!(existing.contains("owner/repo"));
    }

    #[test]
    fn skips_invalid_directory_names() {
        let temp = TempDir::new().unwrap();
        scenario(temp.path(), "developer-tooling", "-bad_repo", None);

        assert!(RepositoryLoader::new(temp.path())
            .load_existing_repos()
            .is_empty());
    }

    #[test]
    fn missing_directory_yields_empty_set() {
        let temp = TempDir::new().unwrap();
        let loader = RepositoryLoader::new(temp.path().join("scenarios"));
        assert!(loader.load_existing_repos().is_empty());
    }
}
