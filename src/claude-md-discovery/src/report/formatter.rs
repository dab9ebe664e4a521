//! Markdown rendering of discovery results.

use super::grouper::{PriorityBucket, PriorityCounts, PriorityGrouper, PriorityThresholds};
use super::sanitize::sanitize_text;
use super::ReportError;
use crate::evaluation::Evaluation;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Body used when a run produced no evaluations.
pub const EMPTY_BODY: &str = "No new candidates found in this discovery run.";

/// Topics shown per candidate.
const MAX_TOPICS: usize = 5;

const SUMMARY_TEMPLATE: &str = "## 🎯 Discovery Summary
- **Total Candidates**: {{total}}
{{#each buckets}}- **{{label}}** ({{range}}): {{count}}
{{/each}}";

const CANDIDATE_TEMPLATE: &str = "### [{{name}}]({{url}}) - **{{score}}/100 points**
**Description**: {{description}}
**Stars**: {{stars}} | **Language**: {{language}} | **Suggested Category**: {{category}}
{{#if topics}}**Topics**: {{topics}}
{{/if}}**CLAUDE.md**: [{{marker_path}}]({{marker_url}})
**Content Size**: {{content_size}} bytes | **Last Updated**: {{last_updated}}
{{#if reasons}}**Scoring Reasons**:
{{#each reasons}}- {{this}}
{{/each}}{{/if}}";

const GUIDELINES: &str = "## 📋 Review Guidelines
When reviewing candidates, please consider:
- **Quality**: Is the CLAUDE.md comprehensive and well-structured?
- **Uniqueness**: Does it demonstrate patterns not already in our collection?
- **Maintainability**: Is the repository actively maintained?
- **Licensing**: Does it have an appropriate open source license?
- **Category Fit**: Is the suggested category appropriate?

**Next Steps**: Review the candidates and create PRs for those that should be added to the collection.";

/// Renders issue titles and bodies.
pub struct IssueFormatter {
    handlebars: Handlebars<'static>,
    grouper: PriorityGrouper,
}

impl Default for IssueFormatter {
    fn default() -> Self {
        Self::new(PriorityThresholds::default())
    }
}

impl IssueFormatter {
    /// Creates a formatter that groups with `thresholds`.
    #[must_use]
    pub fn new(thresholds: PriorityThresholds) -> Self {
        let mut handlebars = Handlebars::new();
        // Free text is sanitized before rendering.
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(true);

        Self {
            handlebars,
            grouper: PriorityGrouper::new(thresholds),
        }
    }

    /// Grouper used for sections and counts.
    #[must_use]
    pub fn grouper(&self) -> &PriorityGrouper {
        &self.grouper
    }

    /// `🤖 Weekly Discovery: N New CLAUDE.md Candidates Found`, with the
    /// exceptional count appended when there are any.
    #[must_use]
    pub fn create_issue_title(&self, evaluations: &[Evaluation]) -> String {
        let counts = self.grouper.counts(evaluations);
        let mut title = format!(
            "🤖 Weekly Discovery: {} New CLAUDE.md Candidates Found",
            counts.total
        );
        if counts.exceptional > 0 {
            title.push_str(&format!(" ({} Exceptional)", counts.exceptional));
        }
        title
    }

    /// Full issue body: summary, one section per non-empty bucket, guidelines.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if a template fails to render.
    pub fn create_issue_body(&self, evaluations: &[Evaluation]) -> Result<String, ReportError> {
        if evaluations.is_empty() {
            return Ok(EMPTY_BODY.to_string());
        }

        let groups = self.grouper.group(evaluations);
        let counts = self.grouper.counts(evaluations);

        let mut parts = vec![self.summary_section(&counts)?];
        for (bucket, members) in groups.sections() {
            parts.push(format!("## 🔥 {}", self.section_title(bucket)));
            parts.push(String::new());
            for evaluation in members {
                parts.push(self.candidate_section(evaluation)?);
            }
        }
        parts.push(GUIDELINES.to_string());

        Ok(parts.join("\n"))
    }

    fn section_title(&self, bucket: PriorityBucket) -> String {
        format!(
            "{} ({})",
            bucket.heading(),
            self.grouper.thresholds().range_label(bucket)
        )
    }

    fn summary_section(&self, counts: &PriorityCounts) -> Result<String, ReportError> {
        let thresholds = self.grouper.thresholds();
        let buckets: Vec<Value> = PriorityBucket::ALL
            .into_iter()
            .map(|bucket| {
                json!({
                    "label": bucket.label(),
                    "range": thresholds.range_label(bucket),
                    "count": counts.get(bucket),
                })
            })
            .collect();

        let data = json!({ "total": counts.total, "buckets": buckets });
        Ok(self.handlebars.render_template(SUMMARY_TEMPLATE, &data)?)
    }

    fn candidate_section(&self, evaluation: &Evaluation) -> Result<String, ReportError> {
        let candidate = &evaluation.candidate;
        let topics: Vec<String> = candidate
            .topics
            .iter()
            .take(MAX_TOPICS)
            .map(|topic| sanitize_text(topic))
            .collect();
        let reasons: Vec<String> = evaluation.reasons.iter().map(|r| sanitize_text(r)).collect();
        let description = if candidate.description.is_empty() {
            "No description".to_string()
        } else {
            sanitize_text(&candidate.description)
        };

        let data = json!({
            "name": sanitize_text(&candidate.full_name),
            "url": candidate.html_url,
            "score": evaluation.score,
            "description": description,
            "stars": format_thousands(candidate.stars),
            "language": sanitize_text(candidate.language.as_deref().unwrap_or("Unknown")),
            "category": evaluation.suggested_category.as_str(),
            "topics": topics.join(", "),
            "marker_path": candidate.marker_file_path,
            "marker_url": candidate.marker_file_url(),
            "content_size": format_thousands(evaluation.content_length as u64),
            "last_updated": evaluation
                .days_since_update
                .map_or_else(|| "unknown".to_string(), |days| format!("{days} days ago")),
            "reasons": reasons,
        });

        Ok(self.handlebars.render_template(CANDIDATE_TEMPLATE, &data)?)
    }
}

/// Formats `n` with comma thousands separators, e.g. `12,345`.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
