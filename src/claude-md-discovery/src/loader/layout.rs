//! Layout of the scenarios tree: `scenarios/<category>/<owner_repo>/`.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Document names looked up in a scenario directory, in order of preference.
pub const SCENARIO_DOCUMENTS: [&str; 2] = ["README.md", "analysis.md"];

/// A leaf directory of the scenarios tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDir {
    /// Name of the category directory.
    pub category: String,

    /// Name of the leaf directory, normally `owner_repo`.
    pub name: String,

    /// Full path of the leaf directory.
    pub path: PathBuf,
}

impl ScenarioDir {
    /// The analysis document of this scenario, if any.
    #[must_use]
    pub fn document(&self) -> Option<PathBuf> {
        scenario_document(&self.path)
    }
}

/// Lists `<category>/<leaf>` directories under `root`, sorted by path.
///
/// Hidden entries are skipped. A missing or unreadable root yields an empty list.
#[must_use]
pub fn scenario_dirs(root: &Path) -> Vec<ScenarioDir> {
    WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let category = entry
                .path()
                .parent()?
                .file_name()?
                .to_string_lossy()
                .to_string();
            let name = entry.file_name().to_string_lossy().to_string();
            if is_hidden(&category) || is_hidden(&name) {
                return None;
            }
            Some(ScenarioDir {
                category,
                name,
                path: entry.into_path(),
            })
        })
        .collect()
}

/// Returns `README.md` if present, else `analysis.md`, else `None`.
#[must_use]
pub fn scenario_document(dir: &Path) -> Option<PathBuf> {
    SCENARIO_DOCUMENTS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
