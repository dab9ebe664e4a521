//! Quality evaluation of candidates.
//!
//! [`RepositoryEvaluator::evaluate_candidate`] fetches the marker file and
//! applies the five-factor rubric from [`rubric`].

mod category;
pub mod rubric;

pub use category::{suggest_category, Category};
pub use rubric::{SubScore, RECOGNIZED_ORGANIZATIONS};

use crate::github::{GitHubApi, GitHubError};
use crate::rate_limit::{retry_with_backoff, RetryPolicy};
use crate::search::Candidate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Points per rubric factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub recognition: u32,
    pub content_depth: u32,
    pub educational_value: u32,
    pub maturity: u32,
    pub community: u32,
}

impl ScoreBreakdown {
    /// Sum of all factors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.recognition + self.content_depth + self.educational_value + self.maturity + self.community
    }
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub candidate: Candidate,

    /// Total score, 0-100.
    pub score: u32,

    pub breakdown: ScoreBreakdown,

    /// Why points were given, in rubric order.
    pub reasons: Vec<String>,

    pub suggested_category: Category,

    /// Length of the marker file in bytes (0 when it could not be fetched).
    pub content_length: usize,

    /// Whole days since the last repository update, if known.
    pub days_since_update: Option<i64>,
}

/// Scores candidates against the rubric.
pub struct RepositoryEvaluator<'a, A: GitHubApi + ?Sized> {
    api: &'a A,
    retry: &'a RetryPolicy,
}

impl<'a, A: GitHubApi + ?Sized> RepositoryEvaluator<'a, A> {
    /// Creates an evaluator.
    pub fn new(api: &'a A, retry: &'a RetryPolicy) -> Self {
        Self { api, retry }
    }

    /// Evaluates a candidate, returning `None` when its repository is gone or
    /// cannot be fetched.
    pub async fn evaluate_candidate(&self, candidate: &Candidate) -> Option<Evaluation> {
        let span = info_span!("evaluate", repo = %candidate.full_name);

        async {
            let lookup = retry_with_backoff(self.retry, "repository", || {
                self.api.repository(&candidate.owner, &candidate.name)
            })
            .await;

            match lookup {
                Ok(_) => {}
                Err(e @ GitHubError::NotFound { .. }) => {
                    warn!(error = %e, "Repository not found, skipping");
                    return None;
                }
                Err(e @ GitHubError::RateLimited { .. }) => {
                    warn!(error = %e, "Rate limited while evaluating, skipping");
                    return None;
                }
                Err(e) => {
                    error!(error = %e, "Failed to evaluate repository");
                    return None;
                }
            }

            let content = self.fetch_marker_content(candidate).await;
            let evaluation = assess(candidate, &content, Utc::now());

            info!(
                score = evaluation.score,
                category = %evaluation.suggested_category,
                "Evaluated candidate"
            );
            Some(evaluation)
        }
        .instrument(span)
        .await
    }

    /// Marker file text, or an empty string when it cannot be read.
    async fn fetch_marker_content(&self, candidate: &Candidate) -> String {
        let result = retry_with_backoff(self.retry, "file_content", || {
            self.api
                .file_content(&candidate.owner, &candidate.name, &candidate.marker_file_path)
        })
        .await;

        match result {
            Ok(file) => file.text.unwrap_or_else(|| {
                warn!(path = %candidate.marker_file_path, "Marker file is not valid UTF-8");
                String::new()
            }),
            Err(e) => {
                warn!(path = %candidate.marker_file_path, error = %e, "Could not fetch marker content");
                String::new()
            }
        }
    }
}

/// Applies the rubric to a candidate and its marker file content.
///
/// Pure: the same inputs always give the same evaluation.
#[must_use]
pub fn assess(candidate: &Candidate, content: &str, now: DateTime<Utc>) -> Evaluation {
    let days_since_update = days_since(candidate.updated_at, now);

    let parts = [
        rubric::recognition(candidate),
        rubric::content_depth(content),
        rubric::educational_value(content, &candidate.description),
        rubric::maturity(days_since_update, &candidate.description),
        rubric::community(candidate, content),
    ];

    let breakdown = ScoreBreakdown {
        recognition: parts[0].points,
        content_depth: parts[1].points,
        educational_value: parts[2].points,
        maturity: parts[3].points,
        community: parts[4].points,
    };
    let reasons = parts.into_iter().flat_map(|part| part.reasons).collect();

    let suggested_category = suggest_category(
        &candidate.description,
        &candidate.topics,
        candidate.language.as_deref(),
        content,
    );
    debug!(?breakdown, category = %suggested_category, "Applied rubric");

    Evaluation {
        candidate: candidate.clone(),
        score: breakdown.total(),
        breakdown,
        reasons,
        suggested_category,
        content_length: content.len(),
        days_since_update,
    }
}

/// Whole days between `updated_at` and `now`, never negative.
#[must_use]
pub fn days_since(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    updated_at.map(|updated| (now - updated).num_days().max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn candidate(stars: u64, updated_at: Option<DateTime<Utc>>) -> Candidate {
        let mut candidate = Candidate::from_json(&format!(
            r#"{{
                "full_name": "test/new-repo",
                "name": "new-repo",
                "owner": "test",
                "description": "Test repository",
                "stars": {stars},
                "html_url": "https://github.com/test/new-repo",
                "claude_file_path": "CLAUDE.md"
            }}"#
        ))
        .unwrap();
        candidate.updated_at = updated_at;
        candidate
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn score_is_sum_of_breakdown() {
        let content = "## Architecture\nLayered design.\n## Development Commands\n```sh\nmake\n```\n";
        let evaluation = assess(&candidate(100, Some(now() - Duration::days(3))), content, now());

        assert_eq!(evaluation.score, evaluation.breakdown.total());
        assert_eq!(evaluation.breakdown.recognition, 4);
        assert_eq!(evaluation.breakdown.content_depth, 15);
        assert_eq!(evaluation.breakdown.maturity, 10);
        assert_eq!(evaluation.days_since_update, Some(3));
        assert_eq!(evaluation.content_length, content.len());
    }

    #[test]
    fn reasons_follow_rubric_order() {
        let content = "## Architecture\nAlways follow the pattern.";
        let evaluation = assess(&candidate(100, Some(now())), content, now());

        let position = |needle: &str| {
            evaluation
                .reasons
                .iter()
                .position(|r| r.contains(needle))
                .unwrap()
        };
        assert!(position("star count") < position("architecture"));
        assert!(position("architecture") < position("pattern"));
        assert!(position("pattern") < position("last week"));
    }

    #[test]
    fn equal_stars_give_equal_recognition() {
        let a = assess(&candidate(750, None), "", now());
        let b = assess(&candidate(750, None), "## Architecture", now());
        assert_eq!(a.breakdown.recognition, b.breakdown.recognition);
    }

    #[test]
    fn score_never_exceeds_hundred() {
        let mut c = candidate(100_000, Some(now()));
        c.owner = "anthropic".to_string();
        c.description = "Battle-tested production platform".to_string();
        let content = format!(
            "## Architecture\n## Development\n## Testing\n## Troubleshooting\n{}\n{}\n{}\nAlways. Never. Must. MCP agent hook.",
            "detail ".repeat(800),
            "Follow the pattern and convention. ".repeat(10),
            "```\ncode\n```\n".repeat(5)
        );

        let evaluation = assess(&c, &content, now());
        assert_eq!(evaluation.score, 100);
    }

    #[test]
    fn unknown_update_time() {
        assert_eq!(days_since(None, now()), None);
        assert_eq!(days_since(Some(now() + Duration::days(2)), now()), Some(0));
    }
}
