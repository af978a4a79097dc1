//! CLI for the README sampler.
//!
//! Samples random GitHub repositories and downloads a quota of unique README
//! files into `readme_files/`. All tuning lives in `readme-sampler.toml`.

use clap::Parser;
use readme_sampler::{RunSummary, Runner, RunnerError, SamplerConfig, CONFIG_FILE_NAME};
use std::path::Path;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// README Sampler - Download README files from randomly chosen GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments (only --help and --version)
    let _args = Args::parse();

    // Use aws-lc-rs for every rustls client in the process
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match run().await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
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
async fn run() -> Result<RunSummary, RunnerError> {
    let config = SamplerConfig::load(Path::new(CONFIG_FILE_NAME))?;
    let mut runner = Runner::connect(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Outcome: {}", summary.final_state);
    println!("  Pages fetched: {}", summary.pages_fetched);
    println!("  Page failures: {}", summary.page_failures);
    println!("  Repositories scanned: {}", summary.repositories_scanned);
    println!("  READMEs saved: {}", summary.saved.len());
    for (reason, count) in &summary.skipped {
        println!("  Skipped ({reason}): {count}");
    }
    println!("  Remaining API calls: {}", summary.remaining_budget);

    for entry in &summary.saved {
        println!("    {} -> {}", entry.source_url, entry.saved_filename);
    }
}
