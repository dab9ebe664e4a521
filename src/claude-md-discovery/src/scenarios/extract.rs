//! Field extraction from scenario documents.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static BULLET: LazyLock<Regex> = LazyLock::new(|| regex(r"[-*]\s+(.+)"));

static TAKEAWAY_SECTIONS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        regex(r"(?i)##\s*(?:Key\s+)?Takeaways?\s*\n((?:[-*]\s+.+\n?)+)"),
        regex(r"(?i)##\s*(?:Key\s+)?Insights?\s*\n((?:[-*]\s+.+\n?)+)"),
        regex(r"(?i)##\s*What\s+(?:Makes|Sets).+\n((?:[-*]\s+.+\n?)+)"),
    ]
});

static FEATURE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)##\s*(?:Key\s+)?Features?\s*\n((?:[-*]\s+.+\n?)+)"));

static WHY_SECTION: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)##\s*Why.+\n((?:[-*]\s+.+\n?)+)"));

static HIGHLIGHT_SECTIONS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        regex(r"(?i)##\s*Highlights?\s*\n((?:[-*]\s+.+\n?)+)"),
        regex(r"(?i)##\s*What.+Covers?\s*\n((?:[-*]\s+.+\n?)+)"),
    ]
});

static EXPLICIT_LANGUAGES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        regex(r"(?i)(?:Languages?|Stack|Tech(?:nology)?|Built with):\s*([^\n]+)"),
        regex(r"(?i)(?:Written in|Powered by)\s+(\w+(?:,?\s*\w+)*)"),
    ]
});

static WORD: LazyLock<Regex> = LazyLock::new(|| regex(r"\b\w+\b"));
static CODE_FENCE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| regex(r"```(\w+)"));
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| regex(r"\.([a-z]{1,4})\b"));

static CLAUDE_MD_URL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"https://github\.com/[^\s\)]+/(?:blob/[^/]+/)?CLAUDE\.md"));

static H1: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#\s+(.+)"));
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| regex(r"\[([^\]]+)\]\([^\)]+\)"));

/// Canonical name for a language keyword, code fence hint or framework.
fn language_name(word: &str) -> Option<&'static str> {
    Some(match word {
        "python" | "py" => "Python",
        "typescript" | "ts" => "TypeScript",
        "javascript" | "js" => "JavaScript",
        "rust" | "rs" => "Rust",
        "go" | "golang" => "Go",
        "ruby" | "rb" => "Ruby",
        "java" => "Java",
        "kotlin" | "kt" => "Kotlin",
        "swift" => "Swift",
        "cpp" | "c++" => "C++",
        "csharp" | "c#" => "C#",
        "php" => "PHP",
        "scala" => "Scala",
        "elixir" => "Elixir",
        "haskell" => "Haskell",
        "lua" => "Lua",
        "shell" | "bash" => "Shell",
        "nix" => "Nix",
        "zig" => "Zig",
        "ocaml" => "OCaml",
        "react" => "React",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "nextjs" | "next.js" => "Next.js",
        _ => return None,
    })
}

/// Language for a file extension.
fn extension_language(ext: &str) -> Option<&'static str> {
    Some(match ext {
        "py" => "Python",
        "ts" => "TypeScript",
        "js" => "JavaScript",
        "rs" => "Rust",
        "go" => "Go",
        "rb" => "Ruby",
        "kt" => "Kotlin",
        "swift" => "Swift",
        "java" => "Java",
        "php" => "PHP",
        _ => return None,
    })
}

/// First `limit` bullets of the first matching section.
fn section_bullets(content: &str, section: &Regex, limit: usize) -> Vec<String> {
    section
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|body| {
            BULLET
                .captures_iter(body.as_str())
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

/// Key lessons of a scenario.
///
/// Uses the first non-empty of: a takeaways, insights or "What makes..."
/// section (up to 5 bullets), a features section (up to 3), a "Why..." section
/// (up to 3).
#[must_use]
pub fn extract_takeaways(content: &str) -> Vec<String> {
    for section in TAKEAWAY_SECTIONS.iter() {
        let bullets = section_bullets(content, section, 5);
        if !bullets.is_empty() {
            return bullets;
        }
    }

    let features = section_bullets(content, &FEATURE_SECTION, 3);
    if !features.is_empty() {
        return features;
    }

    section_bullets(content, &WHY_SECTION, 3)
}

/// Languages mentioned explicitly, as code fence hints or as file extensions. Sorted.
#[must_use]
pub fn extract_languages(content: &str) -> Vec<String> {
    let mut languages = BTreeSet::new();

    for pattern in EXPLICIT_LANGUAGES.iter() {
        for caps in pattern.captures_iter(content) {
            let Some(list) = caps.get(1) else { continue };
            let lower = list.as_str().to_lowercase();
            languages.extend(
                WORD.find_iter(&lower)
                    .filter_map(|word| language_name(word.as_str())),
            );
        }
    }

    languages.extend(
        CODE_FENCE_LANGUAGE
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .filter_map(|hint| language_name(&hint.as_str().to_lowercase())),
    );

    let lower = content.to_lowercase();
    languages.extend(
        FILE_EXTENSION
            .captures_iter(&lower)
            .filter_map(|caps| caps.get(1))
            .filter_map(|ext| extension_language(ext.as_str())),
    );

    languages.into_iter().map(String::from).collect()
}

/// Bullets of a features, highlights or "What... covers" section (up to 5).
#[must_use]
pub fn extract_key_features(content: &str) -> Vec<String> {
    std::iter::once(&*FEATURE_SECTION)
        .chain(HIGHLIGHT_SECTIONS.iter())
        .map(|section| section_bullets(content, section, 5))
        .find(|bullets| !bullets.is_empty())
        .unwrap_or_default()
}

/// Explicit CLAUDE.md URL in the document, else the conventional location.
#[must_use]
pub fn extract_source_url(content: &str, owner: &str, repo: &str) -> String {
    CLAUDE_MD_URL.find(content).map_or_else(
        || format!("https://github.com/{owner}/{repo}/blob/main/CLAUDE.md"),
        |m| m.as_str().to_string(),
    )
}

/// First H1 heading with links unwrapped, else the title-cased repository name.
#[must_use]
pub fn extract_title(content: &str, repo: &str) -> String {
    if let Some(heading) = H1.captures(content).and_then(|caps| caps.get(1)) {
        return MARKDOWN_LINK
            .replace_all(heading.as_str().trim(), "$1")
            .into_owned();
    }

    title_case(&repo.replace(['-', '_'], " "))
}

/// Upper-cases the first letter of every word and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}
