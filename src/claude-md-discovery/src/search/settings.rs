//! Search settings.

use serde::Deserialize;

/// How the code search is run and which hits qualify.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchSettings {
    /// Code search queries, run in order.
    pub queries: Vec<String>,

    /// Marker file names looked up at the repository root, in order.
    pub marker_file_names: Vec<String>,

    /// Pages fetched per query.
    pub max_pages: u32,

    /// Results per page (GitHub allows at most 100).
    pub per_page: u8,

    /// Smallest marker file accepted, in bytes.
    pub min_file_size: u64,

    /// Pause between two pages of the same query, in milliseconds.
    pub page_delay_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let casings = ["claude.md", "CLAUDE.md", "Claude.md"];
        Self {
            queries: casings.iter().map(|c| format!("filename:{c}")).collect(),
            marker_file_names: casings.iter().map(|c| (*c).to_string()).collect(),
            max_pages: 3,
            per_page: 100,
            min_file_size: 500,
            page_delay_ms: 1000,
        }
    }
}
