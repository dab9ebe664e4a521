//! Category suggestion.

use serde::Serialize;
use std::fmt;

/// Top-level section of the collection a repository belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ComplexProjects,
    LibrariesFrameworks,
    DeveloperTooling,
    GettingStarted,
}

/// Languages whose repositories default to libraries and frameworks.
const LIBRARY_LANGUAGES: [&str; 7] = [
    "javascript",
    "typescript",
    "python",
    "java",
    "go",
    "rust",
    "c++",
];

impl Category {
    /// All categories, in tie-break order.
    pub const ALL: [Category; 4] = [
        Category::ComplexProjects,
        Category::LibrariesFrameworks,
        Category::DeveloperTooling,
        Category::GettingStarted,
    ];

    /// Directory name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComplexProjects => "complex-projects",
            Self::LibrariesFrameworks => "libraries-frameworks",
            Self::DeveloperTooling => "developer-tooling",
            Self::GettingStarted => "getting-started",
        }
    }

    /// Keywords that point at this category.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::ComplexProjects => &[
                "microservices",
                "architecture",
                "distributed",
                "enterprise",
                "platform",
                "system",
                "infrastructure",
                "scalable",
                "multi-service",
            ],
            Self::LibrariesFrameworks => &[
                "library",
                "framework",
                "sdk",
                "api",
                "npm",
                "pypi",
                "package",
                "component",
                "widget",
                "utility",
                "helper",
            ],
            Self::DeveloperTooling => &[
                "cli",
                "tool",
                "build",
                "deploy",
                "automation",
                "workflow",
                "pipeline",
                "ci/cd",
                "development",
                "debugging",
            ],
            Self::GettingStarted => &[
                "tutorial",
                "example",
                "demo",
                "sample",
                "template",
                "boilerplate",
                "starter",
                "quickstart",
                "beginner",
                "learning",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the category whose keywords appear most often in the repository text.
///
/// Each keyword counts once when it occurs anywhere in the description, topics
/// or content (case-insensitive). Ties go to the category listed first in
/// [`Category::ALL`]. Without any hit the language decides.
#[must_use]
pub fn suggest_category(
    description: &str,
    topics: &[String],
    language: Option<&str>,
    content: &str,
) -> Category {
    let text = format!("{} {} {}", description, topics.join(" "), content).to_lowercase();

    let mut best: Option<(Category, usize)> = None;
    for category in Category::ALL {
        let hits = category
            .keywords()
            .iter()
            .filter(|keyword| text.contains(*keyword))
            .count();
        if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
            best = Some((category, hits));
        }
    }

    if let Some((category, _)) = best {
        return category;
    }

    match language.map(str::to_lowercase) {
        Some(lang) if LIBRARY_LANGUAGES.contains(&lang.as_str()) => Category::LibrariesFrameworks,
        _ => Category::ComplexProjects,
    }
}
