#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod evaluation;
pub mod github;
pub mod licenses;
pub mod loader;
pub mod rate_limit;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod search;
pub mod summary;
pub mod verify;

pub use config::{load_config, ConfigError, DiscoveryConfig};
pub use evaluation::{assess, suggest_category, Category, Evaluation, RepositoryEvaluator};
pub use github::{GitHubApi, GitHubError, OctocrabClient};
pub use licenses::{LicenseDetector, LicenseError, LicenseResults};
pub use loader::{validate_repo_name, RepositoryLoader};
pub use rate_limit::{retry_with_backoff, RateLimitInfo, RateLimitPolicy, RetryPolicy};
pub use report::{
    sanitize_text, IssueFormatter, IssueGenerator, IssueStatus, PriorityGrouper,
    PriorityThresholds, ReportError,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use scenarios::{extract_scenarios, Scenario, ScenarioError, ScenarioIndex};
pub use search::{Candidate, CandidateError, GitHubSearcher};
pub use summary::RunSummary;
pub use verify::{verify_examples, VerificationResults, VerifyError};
