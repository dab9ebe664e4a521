//! The five factors of the 100-point quality rubric.
//!
//! Every factor returns a [`SubScore`] already clamped to its cap, so the sum
//! never exceeds 100.

use crate::search::Candidate;
use serde::Serialize;

/// Owners whose repositories get a recognition bonus.
pub const RECOGNIZED_ORGANIZATIONS: &[&str] = &[
    "anthropic", "openai", "microsoft", "google", "meta", "facebook", "apple", "amazon", "netflix",
    "uber", "airbnb", "spotify", "github", "gitlab", "atlassian", "docker", "kubernetes",
    "pytorch", "tensorflow", "huggingface", "langchain", "cloudflare", "vercel", "netlify",
    "elastic", "mongodb", "redis", "postgresql", "mysql", "sentry", "datadog", "stripe", "twilio",
    "shopify", "square", "paypal", "ethereum", "bitcoin", "polygon", "chainlink",
];

pub const RECOGNITION_CAP: u32 = 15;
pub const CONTENT_DEPTH_CAP: u32 = 30;
pub const EDUCATIONAL_CAP: u32 = 25;
pub const MATURITY_CAP: u32 = 15;
pub const COMMUNITY_CAP: u32 = 15;

const PATTERN_TERMS: &[&str] = &[
    "pattern",
    "best practice",
    "convention",
    "principle",
    "guideline",
    "idiom",
];

const ACTIONABLE_TERMS: &[&str] = &[
    "step-by-step",
    "step by step",
    "how to",
    "instructions",
    "example",
    "must",
    "always",
    "never",
    "do not",
    "make sure",
];

const PRODUCTION_TERMS: &[&str] = &[
    "production",
    "enterprise",
    "used by",
    "battle-tested",
    "scalable",
    "millions",
    "stable",
];

const WORKFLOW_TERMS: &[&str] = &[
    "custom command",
    "mcp",
    "agent",
    "hook",
    "workflow",
    "slash command",
    "subagent",
];

/// Points for one factor and the reasons they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub points: u32,
    pub reasons: Vec<String>,
}

impl SubScore {
    fn add(&mut self, points: u32, reason: impl Into<String>) {
        self.points += points;
        self.reasons.push(reason.into());
    }

    fn capped(mut self, cap: u32) -> Self {
        self.points = self.points.min(cap);
        self
    }
}

/// Recognized owner or organization of the candidate, original casing.
#[must_use]
pub fn recognized_organization(candidate: &Candidate) -> Option<&str> {
    let is_recognized = |name: &str| RECOGNIZED_ORGANIZATIONS.contains(&name.to_lowercase().as_str());

    if is_recognized(&candidate.owner) {
        return Some(&candidate.owner);
    }
    candidate
        .organization
        .as_deref()
        .filter(|org| is_recognized(org))
}

/// Star tiers plus a bonus for recognized owners.
#[must_use]
pub fn recognition(candidate: &Candidate) -> SubScore {
    let mut score = SubScore::default();
    let stars = candidate.stars;

    match stars {
        5000.. => score.add(12, format!("Exceptional star count ({stars})")),
        1000.. => score.add(10, format!("High star count ({stars})")),
        500.. => score.add(7, format!("Good star count ({stars})")),
        100.. => score.add(4, format!("Moderate star count ({stars})")),
        10.. => score.add(1, format!("Early community interest ({stars} stars)")),
        _ => {}
    }

    if let Some(org) = recognized_organization(candidate) {
        score.add(3, format!("From recognized organization ({org})"));
    }

    score.capped(RECOGNITION_CAP)
}

/// Section coverage and overall length of the marker file.
#[must_use]
pub fn content_depth(content: &str) -> SubScore {
    let mut score = SubScore::default();
    if content.is_empty() {
        return score;
    }

    let lower = content.to_lowercase();
    let has_section = |names: &[&str]| names.iter().any(|name| lower.contains(&format!("## {name}")));

    if has_section(&["architecture", "overview", "design"]) {
        score.add(8, "Contains architecture documentation");
    }
    if has_section(&["development", "building", "commands", "setup", "getting started"]) {
        score.add(7, "Contains development instructions");
    }
    if has_section(&["testing", "tests", "validation"]) {
        score.add(5, "Contains testing information");
    }
    if has_section(&["troubleshooting", "debugging", "common issues", "faq"]) {
        score.add(5, "Contains troubleshooting guidance");
    }

    match content.len() {
        5001.. => score.add(5, "Comprehensive documentation"),
        2001.. => score.add(3, "Detailed documentation"),
        1001.. => score.add(1, "Substantial documentation"),
        _ => {}
    }

    score.capped(CONTENT_DEPTH_CAP)
}

/// How much the file teaches: patterns, code examples and concrete instructions.
#[must_use]
pub fn educational_value(content: &str, description: &str) -> SubScore {
    let mut score = SubScore::default();
    let text = format!("{content} {description}").to_lowercase();

    let pattern_mentions: usize = PATTERN_TERMS.iter().map(|t| text.matches(t).count()).sum();
    match pattern_mentions {
        5.. => score.add(10, format!("Documents patterns and conventions ({pattern_mentions} mentions)")),
        2.. => score.add(6, format!("Mentions patterns and conventions ({pattern_mentions} mentions)")),
        1 => score.add(3, "References a pattern or convention"),
        _ => {}
    }

    let code_blocks = content.matches("```").count() / 2;
    match code_blocks {
        3.. => score.add(8, format!("Rich code examples ({code_blocks} code blocks)")),
        1.. => score.add(5, format!("Includes code examples ({code_blocks} code blocks)")),
        _ => {}
    }

    let actionable = ACTIONABLE_TERMS.iter().filter(|t| text.contains(*t)).count();
    match actionable {
        3.. => score.add(7, "Provides clear actionable guidance"),
        1.. => score.add(4, "Provides some actionable guidance"),
        _ => {}
    }

    score.capped(EDUCATIONAL_CAP)
}

/// Recency of updates and signs of production use.
#[must_use]
pub fn maturity(days_since_update: Option<i64>, description: &str) -> SubScore {
    let mut score = SubScore::default();

    match days_since_update {
        Some(days) if days <= 7 => score.add(10, "Updated within the last week"),
        Some(days) if days <= 30 => score.add(8, "Recently updated (last 30 days)"),
        Some(days) if days <= 90 => score.add(5, "Recently updated (last 90 days)"),
        Some(days) if days <= 180 => score.add(2, "Updated within the last 6 months"),
        _ => {}
    }

    let lower = description.to_lowercase();
    if PRODUCTION_TERMS.iter().any(|t| lower.contains(t)) {
        score.add(5, "Describes production usage");
    }

    score.capped(MATURITY_CAP)
}

/// Standing of the maintainers and distinctive Claude workflows.
#[must_use]
pub fn community(candidate: &Candidate, content: &str) -> SubScore {
    let mut score = SubScore::default();

    if let Some(org) = recognized_organization(candidate) {
        score.add(5, format!("Maintained by a recognized organization ({org})"));
    }

    match candidate.stars {
        1000.. => score.add(5, "High community validation"),
        500.. => score.add(3, "Solid community validation"),
        _ => {}
    }

    let lower = content.to_lowercase();
    let workflows = WORKFLOW_TERMS.iter().filter(|t| lower.contains(*t)).count();
    if workflows >= 2 {
        score.add(5, "Documents distinctive Claude workflows");
    }

    score.capped(COMMUNITY_CAP)
}
