//! Run summary types.

use crate::report::{IssueStatus, PriorityCounts, ReportOutcome};
use std::path::PathBuf;

/// Summary of a complete discovery run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Repositories already in the collection.
    pub existing_repositories: usize,

    /// Candidates returned by the search.
    pub candidates_found: usize,

    /// Candidates that were scored.
    pub candidates_evaluated: usize,

    /// Candidates dropped during evaluation.
    pub candidates_discarded: usize,

    /// Evaluations per priority bucket.
    pub counts: PriorityCounts,

    /// Saved report file.
    pub report_path: Option<PathBuf>,

    /// Issue outcome, `None` when no report was produced.
    pub issue: Option<IssueStatus>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records the outcome of the reporting step.
    pub fn record_report(&mut self, outcome: ReportOutcome) {
        self.report_path = outcome.report_path;
        self.issue = Some(outcome.issue);
    }

    /// Evaluations at or above the "good" threshold.
    #[must_use]
    pub fn quality_candidates(&self) -> usize {
        self.counts.quality()
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.issue.as_ref().is_some_and(IssueStatus::is_failure)
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_report() {
        let mut summary = RunSummary::new(false);
        summary.record_report(ReportOutcome {
            report_path: Some(PathBuf::from("discovery_report_20240101_000000.md")),
            issue: IssueStatus::Created {
                number: 1,
                url: "https://example.com".to_string(),
            },
        });

        assert!(summary.report_path.is_some());
        assert!(summary.all_success());
    }

    #[test]
    fn failed_issue_is_a_failure() {
        let mut summary = RunSummary::new(false);
        summary.record_report(ReportOutcome {
            report_path: None,
            issue: IssueStatus::Failed {
                error: "boom".to_string(),
            },
        });

        assert!(summary.has_failures());
    }

    #[test]
    fn quality_counts_good_and_above() {
        let summary = RunSummary {
            counts: PriorityCounts {
                exceptional: 1,
                high: 2,
                good: 3,
                below_threshold: 4,
                total: 10,
            },
            ..RunSummary::new(true)
        };

        assert_eq!(summary.quality_candidates(), 6);
        assert!(summary.all_success());
    }
}
