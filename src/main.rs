// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments and build the Config
// 2. Fetch the owner's repositories and build the showcase
// 3. Print it (text listing or JSON)
// 4. Exit with proper code (0 = shown, 1 = projects could not be loaded,
//    2 = internal error)
//
// If GitHub refuses or fails the repository-list request we still print a
// showcase: an empty one with a banner saying what went wrong.
// =============================================================================

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use tracing::warn;

use repo_showcase::cli::Cli;
use repo_showcase::github::GithubClient;
use repo_showcase::render::{render_json, render_text};
use repo_showcase::showcase::{load_showcase, Showcase};
use repo_showcase::Config;

#[tokio::main]
async fn main() {
    init_tracing();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so stdout stays clean for --json
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = showcase printed
//   Ok(1) = repositories could not be loaded, empty showcase with a banner
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from(&cli);
    let client = GithubClient::new(&config)?;

    let showcase = match load_showcase(&client, &config).await {
        Ok(showcase) => showcase,
        Err(error) => {
            warn!(%error, rate_limited = error.is_rate_limited(), "showing empty showcase");
            Showcase::unavailable(&config.owner, &error)
        }
    };

    if cli.json {
        println!("{}", render_json(&showcase)?);
    } else {
        print!("{}", render_text(&showcase));
    }

    Ok(if showcase.is_degraded() { 1 } else { 0 })
}
