//! Saving the report and filing the discovery issue.

use super::formatter::IssueFormatter;
use super::grouper::PriorityThresholds;
use super::{IssueStatus, ReportError};
use crate::evaluation::Evaluation;
use crate::github::GitHubApi;
use chrono::Local;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, Instrument};

/// Where and how the report is published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReportSettings {
    /// Repository the issue is filed on, `owner/repo`.
    pub target_repository: String,

    /// Labels attached to the issue.
    pub labels: Vec<String>,

    /// Directory receiving `discovery_report_*.md` files.
    pub output_dir: PathBuf,

    /// Largest issue body GitHub accepts, in characters.
    pub max_issue_body_chars: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            target_repository: "josix/awesome-claude-md".to_string(),
            labels: ["automation", "discovery", "review-needed"]
                .into_iter()
                .map(String::from)
                .collect(),
            output_dir: PathBuf::from("."),
            max_issue_body_chars: 65536,
        }
    }
}

/// What happened to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Saved report file, if it was written.
    pub report_path: Option<PathBuf>,

    /// Issue creation outcome.
    pub issue: IssueStatus,
}

/// Publishes discovery results.
pub struct IssueGenerator<'a, A: GitHubApi + ?Sized> {
    api: &'a A,
    settings: &'a ReportSettings,
    formatter: IssueFormatter,
    dry_run: bool,
}

impl<'a, A: GitHubApi + ?Sized> IssueGenerator<'a, A> {
    /// Creates a generator. In dry-run mode the report is saved but no issue is filed.
    pub fn new(
        api: &'a A,
        settings: &'a ReportSettings,
        thresholds: PriorityThresholds,
        dry_run: bool,
    ) -> Self {
        Self {
            api,
            settings,
            formatter: IssueFormatter::new(thresholds),
            dry_run,
        }
    }

    /// Saves the report file and files the issue.
    ///
    /// Nothing here fails the run: write and API errors are logged and
    /// reflected in the returned [`ReportOutcome`].
    pub async fn create_discovery_issue(&self, evaluations: &[Evaluation]) -> ReportOutcome {
        if evaluations.is_empty() {
            info!("No evaluations to report");
            return ReportOutcome {
                report_path: None,
                issue: IssueStatus::Skipped {
                    reason: "no evaluations".to_string(),
                },
            };
        }

        let title = self.formatter.create_issue_title(evaluations);
        let body = match self.formatter.create_issue_body(evaluations) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to render discovery report");
                return ReportOutcome {
                    report_path: None,
                    issue: IssueStatus::Failed {
                        error: e.to_string(),
                    },
                };
            }
        };

        let report_path = match self.save_report(&title, &body) {
            Ok(path) => {
                info!(path = %path.display(), "Discovery report saved");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, "Error saving discovery report");
                None
            }
        };

        if self.dry_run {
            info!(title = %title, "Dry run, not creating issue");
            return ReportOutcome {
                report_path,
                issue: IssueStatus::Skipped {
                    reason: "dry run".to_string(),
                },
            };
        }

        let body = truncate_for_issue(&body, self.settings.max_issue_body_chars, evaluations.len());
        let issue = self.file_issue(&title, &body).await;
        ReportOutcome { report_path, issue }
    }

    async fn file_issue(&self, title: &str, body: &str) -> IssueStatus {
        let target = &self.settings.target_repository;
        let span = info_span!("create_issue", repo = %target);

        async {
            let Some((owner, repo)) = target.split_once('/') else {
                let e = ReportError::InvalidTarget {
                    repository: target.clone(),
                };
                error!(error = %e, "Cannot create issue");
                return IssueStatus::Failed {
                    error: e.to_string(),
                };
            };

            match self
                .api
                .create_issue(owner, repo, title, body, &self.settings.labels)
                .await
            {
                Ok(issue) => {
                    info!(issue_number = issue.number, url = %issue.url, "Created GitHub issue");
                    IssueStatus::Created {
                        number: issue.number,
                        url: issue.url,
                    }
                }
                Err(e) => {
                    error!(
                        error = %e,
                        title = %title,
                        body_chars = body.chars().count(),
                        "Failed to create GitHub issue"
                    );
                    IssueStatus::Failed {
                        error: e.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Writes `# {title}\n\n{body}` to a timestamped file in the output directory.
    fn save_report(&self, title: &str, body: &str) -> Result<PathBuf, ReportError> {
        let dir = &self.settings.output_dir;
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let file_name = format!("discovery_report_{}.md", Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(file_name);
        std::fs::write(&path, format!("# {title}\n\n{body}")).map_err(|e| io_error(&path, e))?;
        Ok(path)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Cuts `body` to at most `max_chars` characters for the issue API.
///
/// Bodies within the limit are returned unchanged. Longer bodies keep every
/// complete line that fits and end with a notice giving the original length
/// and the number of candidates.
#[must_use]
pub fn truncate_for_issue(body: &str, max_chars: usize, candidate_count: usize) -> String {
    let total_chars = body.chars().count();
    if total_chars <= max_chars {
        return body.to_string();
    }

    let notice = format!(
        "\n\n---\n\n⚠️ **Report truncated**: the full report is {total_chars} characters long \
         and covers {candidate_count} candidates. See the saved discovery report file for \
         the complete list.\n"
    );
    let budget = max_chars.saturating_sub(notice.chars().count());

    let cut = body
        .char_indices()
        .nth(budget)
        .map_or(body.len(), |(index, _)| index);
    let head = &body[..cut];
    let head = if body[cut..].starts_with('\n') {
        head
    } else {
        head.rfind('\n').map_or(head, |index| &head[..index])
    };

    format!("{head}{notice}")
}
