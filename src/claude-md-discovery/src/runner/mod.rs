//! Orchestrates discovery runs: load, search, evaluate, report.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::evaluation::{Evaluation, RepositoryEvaluator};
use crate::github::{GitHubApi, OctocrabClient};
use crate::loader::RepositoryLoader;
use crate::report::{IssueGenerator, PriorityGrouper};
use crate::search::GitHubSearcher;
use crate::summary::RunSummary;
use tracing::info;

/// Runs the discovery pipeline against a [`GitHubApi`].
pub struct Runner<A: GitHubApi = OctocrabClient> {
    config: RunnerConfig,
    api: A,
}

impl Runner<OctocrabClient> {
    /// Builds a runner backed by the real GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::MissingToken`] for an empty token and
    /// [`RunnerError::GitHub`] if the client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        if config.token().trim().is_empty() {
            return Err(RunnerError::MissingToken);
        }
        let api = OctocrabClient::new(Some(config.token()))?;
        Ok(Self { config, api })
    }
}

impl<A: GitHubApi> Runner<A> {
    /// Builds a runner on top of an existing API implementation.
    pub fn with_api(config: RunnerConfig, api: A) -> Self {
        Self { config, api }
    }

    /// Returns the API implementation.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Executes the full orchestration flow.
    ///
    /// Search, evaluation and reporting failures are logged and recorded in
    /// the returned [`RunSummary`].
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the settings fail validation. No
    /// external call is made in that case.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        self.config.settings().validate("runner settings")?;

        let mut summary = RunSummary::new(self.config.dry_run());
        let evaluations = self.discover_new_repositories(&mut summary).await;

        if evaluations.is_empty() {
            info!("No new candidates found");
            return Ok(summary);
        }

        let settings = self.config.settings();
        summary.counts = PriorityGrouper::new(settings.scoring).counts(&evaluations);
        info!(
            count = summary.quality_candidates(),
            threshold = settings.scoring.good,
            "Candidates meeting the quality threshold"
        );

        let reporter = IssueGenerator::new(
            &self.api,
            &settings.report,
            settings.scoring,
            self.config.dry_run(),
        );
        let outcome = reporter.create_discovery_issue(&evaluations).await;
        summary.record_report(outcome);

        Ok(summary)
    }

    /// Loads existing repositories, searches and evaluates candidates.
    ///
    /// Candidates whose evaluation fails are counted as discarded.
    pub async fn discover_new_repositories(&self, summary: &mut RunSummary) -> Vec<Evaluation> {
        let settings = self.config.settings();
        info!("Starting automated discovery of new CLAUDE.md repositories");

        let existing = RepositoryLoader::new(&settings.scenarios_dir).load_existing_repos();
        summary.existing_repositories = existing.len();

        let searcher = GitHubSearcher::new(
            &self.api,
            &settings.search,
            &settings.retry,
            &settings.rate_limit,
        );
        let candidates = searcher.search_github_repos(&existing).await;
        summary.candidates_found = candidates.len();

        let evaluator = RepositoryEvaluator::new(&self.api, &settings.retry);
        let mut evaluations = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match evaluator.evaluate_candidate(candidate).await {
                Some(evaluation) => evaluations.push(evaluation),
                None => summary.candidates_discarded += 1,
            }
        }
        summary.candidates_evaluated = evaluations.len();

        info!(
            found = summary.candidates_found,
            evaluated = summary.candidates_evaluated,
            discarded = summary.candidates_discarded,
            "Discovery complete"
        );
        evaluations
    }
}
