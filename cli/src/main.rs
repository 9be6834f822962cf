//! CLI for repo-announcer.
//!
//! Searches GitHub for recently pushed repositories in a language and
//! announces the notable ones on Twitter/X.

use clap::Parser;
use repo_announcer::{
    twitter_credentials_from_env, ConfigError, RunSummary, Runner, RunnerConfig, RunnerError,
    Settings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// repo-announcer - Announce notable, recently pushed GitHub repositories on Twitter/X.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repository language to search for [default: solidity].
    #[arg(long)]
    language: Option<String>,

    /// How far back to look for pushes, e.g. "3h" or "1h30m" [default: 3h].
    #[arg(long)]
    window: Option<String>,

    /// Announce only repositories with more stars than this [default: 10].
    #[arg(long)]
    min_stars: Option<u32>,

    /// Maximum post length [default: 280].
    #[arg(long)]
    max_length: Option<usize>,

    /// Maximum concurrent commit lookups [default: 1].
    #[arg(long)]
    concurrency: Option<usize>,

    /// File recording announced repositories, to avoid reposting on reruns.
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// GitHub Personal Access Token. Unauthenticated access when unset.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print announcements instead of posting them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in a local .env file
    let dotenv = dotenvy::dotenv();

    init_tracing();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let args = Args::parse();

    match run(args).await {
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

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = build_config(args)?;
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Merges the settings file, command-line flags and environment.
fn build_config(args: Args) -> Result<RunnerConfig, ConfigError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut config = RunnerConfig::from_settings(&settings);

    if let Some(language) = args.language {
        config = config.with_language(language);
    }
    if let Some(window) = args.window {
        repo_announcer::parse_duration(&window).map_err(|e| ConfigError::ValidationError {
            path: "--window".to_string(),
            message: e.to_string(),
        })?;
        config = config.with_window(window);
    }
    if let Some(min_stars) = args.min_stars {
        config = config.with_min_stars(min_stars);
    }
    if let Some(max_length) = args.max_length {
        config = config.with_max_length(max_length);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(path) = args.history_file {
        config = config.with_history_path(path);
    }

    let credentials = match twitter_credentials_from_env() {
        Ok(credentials) => Some(credentials),
        Err(_) if args.dry_run => None,
        Err(e) => return Err(e),
    };

    Ok(config
        .with_github_token(args.token)
        .with_twitter_credentials(credentials)
        .with_dry_run(args.dry_run))
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Repositories discovered: {}",
        summary.candidates_discovered
    );
    if summary.dry_run {
        println!("  Announcements previewed: {}", summary.previewed);
    } else {
        println!("  Announcements published: {}", summary.published);
    }
    println!("  Rejected by filter: {}", summary.rejected);
    println!("  Already announced: {}", summary.skipped);
    println!("  Commit lookups failed: {}", summary.lookup_failures);
    println!("  Formatting failed: {}", summary.format_failures);
    println!("  Publishing failed: {}", summary.publish_failures);
    if summary.history_failures > 0 {
        println!("  History not saved: reruns may repost these announcements");
    }
}
