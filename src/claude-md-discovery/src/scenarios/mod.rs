//! Scenario index extraction.
//!
//! Turns `scenarios/<category>/<owner_repo>/` documents into the
//! `scenarios.json` index consumed by the documentation site.

mod error;
mod extract;

pub use error::ScenarioError;
pub use extract::{
    extract_key_features, extract_languages, extract_source_url, extract_takeaways, extract_title,
};

use crate::loader::{scenario_dirs, ScenarioDir};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Default output location, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "docs/public/scenarios.json";

/// One curated example.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Directory name, `owner_repo`.
    pub id: String,
    pub category: String,
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub source_url: String,

    /// Document path relative to the project root.
    pub analysis_path: String,

    pub languages: Vec<String>,
    pub takeaways: Vec<String>,
    pub key_features: Vec<String>,

    /// Modification date of the document, `YYYY-MM-DD`.
    pub last_updated: String,

    /// Full document text, for search indexing.
    pub content: String,
}

/// All scenarios plus facets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioIndex {
    /// Scenarios sorted by category, then case-insensitive title.
    pub scenarios: Vec<Scenario>,
    pub categories: Vec<String>,
    pub languages: Vec<String>,
    pub generated_at: DateTime<Local>,
    pub total_count: usize,
}

/// Builds the index for the project rooted at `project_root`.
///
/// # Errors
///
/// Returns [`ScenarioError::MissingDirectory`] if `project_root/scenarios` does not exist.
pub fn extract_scenarios(project_root: &Path) -> Result<ScenarioIndex, ScenarioError> {
    let scenarios_dir = project_root.join("scenarios");
    if !scenarios_dir.is_dir() {
        return Err(ScenarioError::MissingDirectory {
            path: scenarios_dir.display().to_string(),
        });
    }

    let categories: BTreeSet<String> = WalkDir::new(&scenarios_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.'))
        .collect();

    let mut scenarios: Vec<Scenario> = scenario_dirs(&scenarios_dir)
        .iter()
        .filter_map(|dir| process_scenario(dir, project_root))
        .collect();
    scenarios.sort_by_key(|s| (s.category.clone(), s.title.to_lowercase()));

    let languages: BTreeSet<String> = scenarios
        .iter()
        .flat_map(|s| s.languages.iter().cloned())
        .collect();

    info!(
        scenarios = scenarios.len(),
        categories = categories.len(),
        "Extracted scenarios"
    );

    Ok(ScenarioIndex {
        total_count: scenarios.len(),
        scenarios,
        categories: categories.into_iter().collect(),
        languages: languages.into_iter().collect(),
        generated_at: Local::now(),
    })
}

/// Writes the index as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`ScenarioError`] if serialization or writing fails.
pub fn write_index(index: &ScenarioIndex, path: &Path) -> Result<(), ScenarioError> {
    let io_error = |source| ScenarioError::IoError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(index)?;
    std::fs::write(path, json).map_err(io_error)?;

    info!(path = %path.display(), "Scenario index written");
    Ok(())
}

fn process_scenario(dir: &ScenarioDir, project_root: &Path) -> Option<Scenario> {
    let Some(document) = dir.document() else {
        debug!(dir = %dir.path.display(), "No scenario document");
        return None;
    };
    let (owner, repo) = dir.name.split_once('_')?;

    let content = match std::fs::read_to_string(&document) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %document.display(), error = %e, "Failed to read scenario document");
            return None;
        }
    };

    let last_updated = std::fs::metadata(&document)
        .and_then(|meta| meta.modified())
        .map(|modified| DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    Some(Scenario {
        id: dir.name.clone(),
        category: dir.category.clone(),
        owner: owner.to_string(),
        repo: repo.to_string(),
        title: extract_title(&content, repo),
        source_url: extract_source_url(&content, owner, repo),
        analysis_path: relative_path(&document, project_root),
        languages: extract_languages(&content),
        takeaways: extract_takeaways(&content),
        key_features: extract_key_features(&content),
        last_updated,
        content,
    })
}

fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}
