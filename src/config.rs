// src/config.rs
// =============================================================================
// The one configuration value for a render pass.
//
// It is built once from the command line (see cli.rs) and then handed to the
// GitHub client and the featured selector. Nothing reads configuration from
// globals and nothing changes it after startup.
// =============================================================================

use crate::cli::Cli;

/// Default GitHub REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// How many README requests may be in flight at once by default.
pub const DEFAULT_README_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub login whose repositories are shown
    pub owner: String,
    /// Optional static credential sent as `Authorization: token ...`
    pub token: Option<String>,
    /// Repository names that are always featured first
    pub featured: Vec<String>,
    /// API root, without a trailing slash
    pub api_base: String,
    /// Upper bound on concurrent README requests (at least 1)
    pub readme_concurrency: usize,
    /// When false no README is requested and every snippet is unavailable
    pub fetch_snippets: bool,
    pub skip_forks: bool,
    pub skip_archived: bool,
}

impl Config {
    /// A configuration with defaults for everything except the owner.
    pub fn new(owner: impl Into<String>) -> Self {
        Config {
            owner: owner.into(),
            token: None,
            featured: Vec::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            readme_concurrency: DEFAULT_README_CONCURRENCY,
            fetch_snippets: true,
            skip_forks: false,
            skip_archived: false,
        }
    }

    /// Same configuration pointed at another API root (used by tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        // Blank entries (e.g. "a,,b" or a trailing comma) carry no name
        let featured = cli
            .featured
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        // An empty token from the environment means "no token"
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Config {
            owner: cli.owner.trim().to_string(),
            token,
            featured,
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            readme_concurrency: cli.concurrency.max(1),
            fetch_snippets: !cli.no_readme,
            skip_forks: cli.skip_forks,
            skip_archived: cli.skip_archived,
        }
    }
}
