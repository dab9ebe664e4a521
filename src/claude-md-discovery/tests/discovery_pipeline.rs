mod common;

use claude_md_discovery::{Category, IssueStatus, Runner, RunnerConfig, RunnerError, RunSummary};
use common::{marker_content, repository, test_config, write_scenario, FakeGitHub};
use std::fs;
use tempfile::TempDir;

const QUERY: &str = "filename:claude.md";
const UPPER_QUERY: &str = "filename:CLAUDE.md";

fn fake_with_new_repo() -> FakeGitHub {
    FakeGitHub::new()
        .with_search_hit(QUERY, 1, "microsoft/semanticworkbench", "CLAUDE.md")
        .with_search_hit(QUERY, 1, "test/new-repo", "CLAUDE.md")
        .with_search_hit(UPPER_QUERY, 1, "test/new-repo", "CLAUDE.md")
        .with_repository(repository("microsoft/semanticworkbench", 900))
        .with_repository(repository("test/new-repo", 100))
        .with_file("microsoft/semanticworkbench", "CLAUDE.md", &marker_content())
        .with_file("test/new-repo", "CLAUDE.md", &marker_content())
}

fn seed_existing(root: &std::path::Path) {
    write_scenario(
        root,
        "complex-projects",
        "microsoft_semanticworkbench",
        "# Semantic Workbench\n\n**Repository**: https://github.com/microsoft/semanticworkbench\n",
    );
}

fn runner(root: &std::path::Path, api: FakeGitHub, dry_run: bool) -> Runner<FakeGitHub> {
    let config = RunnerConfig::new(test_config(root), "token".to_string(), dry_run);
    Runner::with_api(config, api)
}

#[tokio::test]
async fn new_repository_is_discovered_and_scored() {
    let temp = TempDir::new().unwrap();
    seed_existing(temp.path());
    let runner = runner(temp.path(), fake_with_new_repo(), true);

    let mut summary = RunSummary::new(true);
    let evaluations = runner.discover_new_repositories(&mut summary).await;

    assert_eq!(summary.existing_repositories, 1);
    assert_eq!(summary.candidates_found, 1);
    assert_eq!(evaluations.len(), 1);

    let evaluation = &evaluations[0];
    assert_eq!(evaluation.candidate.full_name, "test/new-repo");
    assert_eq!(evaluation.candidate.marker_file_path, "CLAUDE.md");
    assert!(evaluation.score > 0);
    assert!(matches!(
        evaluation.suggested_category,
        Category::DeveloperTooling | Category::ComplexProjects
    ));
}

#[tokio::test]
async fn run_files_issue_and_saves_report() {
    let temp = TempDir::new().unwrap();
    seed_existing(temp.path());
    let runner = runner(temp.path(), fake_with_new_repo(), false);

    let summary = runner.run().await.unwrap();

    assert_eq!(summary.candidates_evaluated, 1);
    assert_eq!(summary.counts.total, 1);
    assert!(summary.all_success());
    assert!(matches!(summary.issue, Some(IssueStatus::Created { number: 1, .. })));

    let issues = runner.api().issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].repository, "josix/awesome-claude-md");
    assert_eq!(
        issues[0].title,
        "🤖 Weekly Discovery: 1 New CLAUDE.md Candidates Found"
    );
    assert_eq!(issues[0].labels, vec!["automation", "discovery", "review-needed"]);
    assert!(issues[0].body.contains("## 🎯 Discovery Summary"));
    assert!(issues[0].body.contains("https://github.com/test/new-repo"));

    let report_path = summary.report_path.unwrap();
    let file_name = report_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("discovery_report_"));
    assert!(file_name.ends_with(".md"));
    let report = fs::read_to_string(report_path).unwrap();
    assert!(report.starts_with("# 🤖 Weekly Discovery"));
}

#[tokio::test]
async fn dry_run_writes_report_without_issue() {
    let temp = TempDir::new().unwrap();
    let runner = runner(temp.path(), fake_with_new_repo(), true);

    let summary = runner.run().await.unwrap();

    // Without a scenarios tree both repositories are new.
    assert_eq!(summary.existing_repositories, 0);
    assert_eq!(summary.candidates_evaluated, 2);
    assert!(runner.api().issues().is_empty());
    assert!(matches!(summary.issue, Some(IssueStatus::Skipped { .. })));
    assert!(summary.report_path.is_some_and(|p| p.is_file()));
}

#[tokio::test]
async fn issue_failure_is_reported_not_raised() {
    let temp = TempDir::new().unwrap();
    let runner = runner(temp.path(), fake_with_new_repo().failing_issue_creation(), false);

    let summary = runner.run().await.unwrap();

    assert!(summary.has_failures());
    assert!(matches!(summary.issue, Some(IssueStatus::Failed { .. })));
    assert!(summary.report_path.is_some());
}

#[tokio::test]
async fn unqualified_repositories_are_skipped() {
    let temp = TempDir::new().unwrap();
    let mut archived = repository("test/archived", 5000);
    archived.archived = true;
    let mut fork = repository("test/fork", 5000);
    fork.fork = true;

    let api = FakeGitHub::new()
        .with_search_hit(QUERY, 1, "test/archived", "CLAUDE.md")
        .with_search_hit(QUERY, 1, "test/fork", "CLAUDE.md")
        .with_search_hit(QUERY, 1, "test/tiny", "CLAUDE.md")
        .with_search_hit(QUERY, 1, "test/gone", "CLAUDE.md")
        .with_search_hit(QUERY, 1, "test/lowercase", "claude.md")
        .with_repository(archived)
        .with_repository(fork)
        .with_repository(repository("test/tiny", 10))
        .with_repository(repository("test/lowercase", 10))
        .with_file("test/archived", "CLAUDE.md", &marker_content())
        .with_file("test/fork", "CLAUDE.md", &marker_content())
        .with_file("test/tiny", "CLAUDE.md", "# Too short")
        .with_file("test/lowercase", "claude.md", &marker_content());
    let runner = runner(temp.path(), api, true);

    let mut summary = RunSummary::new(true);
    let evaluations = runner.discover_new_repositories(&mut summary).await;

    assert_eq!(evaluations.len(), 1);
    assert_eq!(evaluations[0].candidate.full_name, "test/lowercase");
    assert_eq!(evaluations[0].candidate.marker_file_path, "claude.md");
}

#[tokio::test]
async fn empty_search_produces_no_report() {
    let temp = TempDir::new().unwrap();
    let runner = runner(temp.path(), FakeGitHub::new(), false);

    let summary = runner.run().await.unwrap();

    assert_eq!(summary.candidates_found, 0);
    assert!(summary.issue.is_none());
    assert!(summary.report_path.is_none());
    assert!(runner.api().issues().is_empty());
}

#[test]
fn empty_token_is_rejected() {
    let config = RunnerConfig::new(Default::default(), "  ".to_string(), false);
    assert!(matches!(Runner::new(config), Err(RunnerError::MissingToken)));
}
