//! Coevo CLI - command-line interface for the co-evolution mining toolkit
//!
//! Provides the `analyze`, `scan` and `discover` entry points used to collect
//! metamodel/model co-evolution data from JetBrains MPS repositories.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use coevo_analysis::{ModelScanner, RepositoryAnalyzer};
use coevo_core::{init_logging, CoevoConfig, CoevoResult, LoggingConfig};
use coevo_discovery::{run_discovery, ApiClientConfig, GitHubSearchClient};

#[derive(Parser)]
#[command(name = "coevo")]
#[command(about = "Mining metamodel/model co-evolution data from MPS repositories")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the git history of one or more local checkouts
    Analyze {
        /// Repository paths to analyze
        #[arg(required = true)]
        repos: Vec<PathBuf>,

        /// Directory for the exported JSON reports
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Scan a local checkout for model and metamodel files
    Scan {
        /// Repository path to scan
        repo: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long, default_value = "mps_models_analysis.json")]
        output: PathBuf,

        /// Number of example findings to print
        #[arg(long, default_value = "5")]
        sample: usize,
    },

    /// Search the remote API for candidate MPS repositories
    Discover {
        /// Search queries (defaults to the configured query set)
        #[arg(short, long)]
        query: Vec<String>,

        /// Results per query
        #[arg(long)]
        per_page: Option<u32>,

        /// Access token for authenticated requests
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> CoevoResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| coevo_core::CoevoError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: coevo_core::ErrorContext::new("cli").with_operation("init_logging"),
    })?;

    info!("Starting coevo v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    config.validate()?;

    match cli.command {
        Commands::Analyze { repos, output_dir } => {
            handle_analyze(repos, output_dir, &config).await?;
        }
        Commands::Scan {
            repo,
            output,
            sample,
        } => {
            handle_scan(repo, output, sample, &config)?;
        }
        Commands::Discover {
            query,
            per_page,
            token,
        } => {
            handle_discover(query, per_page, token, &config).await?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> CoevoResult<CoevoConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return CoevoConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("coevo").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".coevo").join("config.toml")),
        Some(PathBuf::from("coevo.toml")),
    ];

    for path in default_paths.into_iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return CoevoConfig::from_file(&path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(CoevoConfig::default())
}

async fn handle_analyze(
    repos: Vec<PathBuf>,
    output_dir: PathBuf,
    config: &CoevoConfig,
) -> CoevoResult<()> {
    let mut summary: Vec<(String, f64, PathBuf)> = Vec::new();

    for repo in repos {
        if !repo.exists() {
            error!(repo = %repo.display(), "repository not found, skipping");
            continue;
        }

        println!("\nAnalyzing: {}", repo.display());
        println!("{}", "=".repeat(50));

        let analyzer = RepositoryAnalyzer::new(&repo, config.analysis.clone());
        let report = match analyzer.analyze().await {
            Ok(report) => report,
            Err(e) => {
                error!(repo = %repo.display(), error = %e, "analysis failed, skipping");
                continue;
            }
        };

        println!("{}", report.render_text());

        let output = output_dir.join(format!("analysis_{}.json", report.repository));
        report.export_json(&output)?;
        println!("Report exported to: {}", output.display());

        summary.push((report.repository.clone(), report.suitability_score, output));
    }

    println!("\n{}", "=".repeat(60));
    println!("FINAL SUMMARY");
    println!("{}", "=".repeat(60));

    summary.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (name, score, output) in &summary {
        println!("{:30} score: {:5.1} ({})", name, score, output.display());
    }

    Ok(())
}

fn handle_scan(
    repo: PathBuf,
    output: PathBuf,
    sample: usize,
    config: &CoevoConfig,
) -> CoevoResult<()> {
    println!("Scanning repository: {}", repo.display());
    println!("{}", "=".repeat(60));

    let scanner = ModelScanner::new(&repo, config.scan.clone());
    let report = scanner.scan()?;

    println!("{}", report.render_statistics());
    println!("{}", report.render_samples(sample));

    report.export_json(&output)?;
    println!("Results exported to: {}", output.display());

    Ok(())
}

async fn handle_discover(
    queries: Vec<String>,
    per_page: Option<u32>,
    token: Option<String>,
    config: &CoevoConfig,
) -> CoevoResult<()> {
    let mut discovery = config.discovery.clone();
    if !queries.is_empty() {
        discovery.queries = queries;
    }
    if let Some(per_page) = per_page {
        discovery.per_page = per_page;
    }

    let token = token.or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let client = GitHubSearchClient::new(ApiClientConfig::github(token))?;

    let outcomes = run_discovery(&client, &discovery).await;

    for outcome in &outcomes {
        println!("\nQuery: {}", outcome.query);
        println!("Total found: {}", outcome.total_count);

        for repo in &outcome.matches {
            println!("  {}/{}", repo.owner, repo.name);
            println!(
                "    {}",
                repo.description.as_deref().unwrap_or("No description")
            );
        }

        if outcome.candidates.is_empty() {
            println!("  No candidate model repositories on this page");
        } else {
            for repo in &outcome.candidates {
                println!("  CANDIDATE MODEL REPOSITORY: {}/{}", repo.owner, repo.name);
            }
        }
    }

    Ok(())
}
