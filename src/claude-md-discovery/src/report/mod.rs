//! Discovery reports.
//!
//! Groups evaluations by priority, renders them as Markdown, saves the report
//! locally and files it as an issue on the collection repository.

mod error;
mod formatter;
mod grouper;
mod issue;
mod sanitize;
mod status;

pub use error::ReportError;
pub use formatter::{format_thousands, IssueFormatter, EMPTY_BODY};
pub use grouper::{
    PriorityBucket, PriorityCounts, PriorityGrouper, PriorityGroups, PriorityThresholds,
};
pub use issue::{truncate_for_issue, IssueGenerator, ReportOutcome, ReportSettings};
pub use sanitize::{html_escape, sanitize_text, MAX_TEXT_LENGTH};
pub use status::IssueStatus;
