// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is a plain struct and clap generates the
// parsing code from the attributes. A few flags can also come from the
// environment (GITHUB_TOKEN, SHOWCASE_FEATURED, GITHUB_API_URL), which is
// handy in CI where secrets are exposed as variables.
//
// The parsed Cli is turned into an immutable Config (see config.rs) right
// after parsing; nothing else in the program looks at Cli.
// =============================================================================

use clap::Parser;

use crate::config::{DEFAULT_API_BASE, DEFAULT_README_CONCURRENCY};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "repo-showcase",
    version,
    about = "Build a portfolio showcase from a GitHub user's public repositories",
    long_about = "repo-showcase lists a GitHub user's public repositories and groups them into \
                  Featured, By category and All projects sections, each project shown as a card \
                  with its live link, code link and a short README preview."
)]
pub struct Cli {
    /// GitHub login whose repositories are shown (e.g. octocat)
    #[arg(value_parser = non_empty)]
    pub owner: String,

    /// Personal access token, raises the API rate limit
    ///
    /// Sent as a static `Authorization` header; nothing else is done with it.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository names that are always featured first (comma separated)
    #[arg(long, env = "SHOWCASE_FEATURED", value_delimiter = ',')]
    pub featured: Vec<String>,

    /// GitHub API root, only useful for GitHub Enterprise or testing
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,

    /// Maximum number of README requests in flight at once
    ///
    /// 1 fetches READMEs strictly one after another.
    #[arg(long, default_value_t = DEFAULT_README_CONCURRENCY, value_parser = positive_usize)]
    pub concurrency: usize,

    /// Do not fetch READMEs (no snippets, far fewer API calls)
    #[arg(long)]
    pub no_readme: bool,

    /// Leave forked repositories out of every section
    #[arg(long)]
    pub skip_forks: bool,

    /// Leave archived repositories out of every section
    #[arg(long)]
    pub skip_archived: bool,

    /// Output the showcase as JSON instead of a text listing
    #[arg(long)]
    pub json: bool,
}

// clap value parsers: returning Err(String) makes clap print a usage error

fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("owner must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn positive_usize(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("not a number: {}", e)),
    }
}
