//! CLI for the CLAUDE.md discovery toolkit.
//!
//! `discover` searches GitHub for new CLAUDE.md files and files a review
//! issue. The other subcommands maintain the curated `scenarios/` tree.

use clap::{Args, Parser, Subcommand};
use claude_md_discovery::config::load_config;
use claude_md_discovery::licenses::{write_results, LicenseDetector, LicenseResults};
use claude_md_discovery::verify::{self, VerificationResults};
use claude_md_discovery::{
    scenarios, OctocrabClient, RetryPolicy, RunSummary, Runner, RunnerConfig, RunnerError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// CLAUDE.md Discovery - Find, score and report CLAUDE.md files worth curating.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search GitHub for new candidates and file a discovery issue.
    Discover(DiscoverArgs),
    /// Detect licenses of the repositories referenced by scenario documents.
    DetectLicenses(DetectLicensesArgs),
    /// Build the scenarios.json search index.
    ExtractScenarios(ExtractScenariosArgs),
    /// Check example directories for documents, links and naming.
    VerifyExamples(VerifyExamplesArgs),
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    /// Path to a discovery.toml file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Search and evaluate, save the report, but do not create an issue.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct DetectLicensesArgs {
    /// Path to the scenarios directory.
    #[arg(long, default_value = "scenarios")]
    scenarios_dir: PathBuf,

    /// Insert missing license lines into the documents.
    #[arg(long)]
    update: bool,

    /// Write the results to this JSON file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// GitHub token, optional but raises the rate limit.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Args, Debug)]
struct ExtractScenariosArgs {
    /// Project root containing the scenarios directory.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Output file, defaults to docs/public/scenarios.json under the project root.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyExamplesArgs {
    /// Path to the scenarios directory.
    #[arg(long, default_value = "scenarios")]
    scenarios_dir: PathBuf,

    /// Output file for the results.
    #[arg(long, default_value = verify::DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Fails only when a provider is already installed.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    match cli.command {
        Command::Discover(args) => discover(args).await,
        Command::DetectLicenses(args) => detect_licenses(args).await,
        Command::ExtractScenarios(args) => extract_scenarios(args),
        Command::VerifyExamples(args) => verify_examples(args),
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn discover(args: DiscoverArgs) -> ExitCode {
    match run_discovery(args).await {
        Ok(summary) => {
            print_summary(&summary);
            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

async fn run_discovery(args: DiscoverArgs) -> Result<RunSummary, RunnerError> {
    let settings = load_config(args.config.as_deref())?;
    let runner = Runner::new(RunnerConfig::new(settings, args.token, args.dry_run))?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Existing repositories: {}", summary.existing_repositories);
    println!("  Candidates found: {}", summary.candidates_found);
    println!("  Candidates evaluated: {}", summary.candidates_evaluated);
    println!("  Candidates discarded: {}", summary.candidates_discarded);
    println!("  Exceptional: {}", summary.counts.exceptional);
    println!("  High: {}", summary.counts.high);
    println!("  Good: {}", summary.counts.good);
    println!("  Below threshold: {}", summary.counts.below_threshold);
    println!("  Quality candidates: {}", summary.quality_candidates());

    if let Some(path) = &summary.report_path {
        println!("  Report: {}", path.display());
    }
    if let Some(issue) = &summary.issue {
        println!("  Issue: {issue}");
    }
}

async fn detect_licenses(args: DetectLicensesArgs) -> ExitCode {
    if args.token.is_none() {
        warn!("No GITHUB_TOKEN set, API rate limits will be lower");
    }

    let api = match OctocrabClient::new(args.token.as_deref()) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "Failed to create GitHub client");
            return ExitCode::from(2);
        }
    };
    let retry = RetryPolicy::default();
    let mut detector = LicenseDetector::new(&api, &retry);

    let results = match detector.run(&args.scenarios_dir, args.update).await {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "License detection failed");
            return ExitCode::from(2);
        }
    };
    print_licenses(&results);

    if let Some(output) = &args.output {
        if let Err(e) = write_results(&results, output) {
            error!(error = %e, "Failed to write results");
            return ExitCode::from(2);
        }
        info!(path = %output.display(), "Results saved");
    }
    ExitCode::from(0)
}

fn print_licenses(results: &LicenseResults) {
    let found = results.values().filter(|l| l.is_some()).count();

    println!("\nLicense detection:");
    println!("  Files processed: {}", results.len());
    println!("  Licenses found: {found}");
    println!("  No license found: {}", results.len() - found);

    for (path, license) in results {
        match license {
            Some(license) => println!("  {path}: {license}"),
            None => println!("  {path}: -"),
        }
    }
}

fn extract_scenarios(args: ExtractScenariosArgs) -> ExitCode {
    let output = args
        .output
        .unwrap_or_else(|| args.project_root.join(scenarios::DEFAULT_OUTPUT));

    let result = scenarios::extract_scenarios(&args.project_root)
        .and_then(|index| scenarios::write_index(&index, &output).map(|()| index));

    match result {
        Ok(index) => {
            println!("\nScenario index:");
            println!("  Scenarios: {}", index.total_count);
            println!("  Categories: {}", index.categories.join(", "));
            println!("  Languages: {}", index.languages.join(", "));
            println!("  Output: {}", output.display());
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Scenario extraction failed");
            ExitCode::from(2)
        }
    }
}

fn verify_examples(args: VerifyExamplesArgs) -> ExitCode {
    let results = match verify::verify_examples(&args.scenarios_dir) {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "Verification failed");
            return ExitCode::from(2);
        }
    };
    print_verification(&results);

    if let Err(e) = verify::write_results(&results, &args.output) {
        error!(error = %e, "Failed to write results");
        return ExitCode::from(2);
    }

    if results.has_failures() {
        ExitCode::from(1)
    } else {
        ExitCode::from(0)
    }
}

fn print_verification(results: &VerificationResults) {
    println!("\nVerification:");
    println!("  Total examples: {}", results.total);
    println!("  Passed: {}", results.passed);
    println!("  Failed: {}", results.failed);

    for example in &results.issues {
        println!("\n  {} ({}):", example.path, example.category);
        for finding in &example.issues {
            println!("    {finding}");
        }
    }
}
