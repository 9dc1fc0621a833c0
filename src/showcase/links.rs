// src/showcase/links.rs
// =============================================================================
// Decides where a card's buttons point.
//
// Live link, first match wins:
// 1. `homepage` is an absolute http(s) URL with a host -> use it (LiveDemo)
// 2. otherwise guess GitHub Pages: https://{owner}.github.io/{name}/
//    (PagesGuess, never checked over the network)
// 3. if even that cannot be built (odd owner login) -> the code page
//
// Code link: always the repository's html_url.
//
// Everything here is pure: no I/O and no error path.
//
// Rust concepts:
// - Option chaining with ? inside functions that return Option
// - url::Url for parsing instead of string prefix checks
// =============================================================================

use serde::Serialize;
use url::Url;

use crate::github::RepositorySummary;

/// Where a resolved link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// The homepage set on the repository
    LiveDemo,
    /// Constructed GitHub Pages address, may not exist
    PagesGuess,
    /// The repository page on GitHub
    CodePage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: String,
    pub kind: LinkKind,
}

impl ResolvedLink {
    /// True only for a homepage the owner actually set.
    pub fn is_live_demo(&self) -> bool {
        self.kind == LinkKind::LiveDemo
    }
}

/// Resolves the "live" link for a card.
pub fn resolve_live_target(repo: &RepositorySummary, owner_login: &str) -> ResolvedLink {
    if let Some(homepage) = repo.homepage.as_deref().and_then(valid_homepage) {
        return ResolvedLink {
            url: homepage.to_string(),
            kind: LinkKind::LiveDemo,
        };
    }

    match pages_url(owner_login, &repo.name) {
        Some(url) => ResolvedLink {
            url,
            kind: LinkKind::PagesGuess,
        },
        None => resolve_code_target(repo),
    }
}

/// Resolves the "code" link for a card.
pub fn resolve_code_target(repo: &RepositorySummary) -> ResolvedLink {
    ResolvedLink {
        url: repo.html_url.clone(),
        kind: LinkKind::CodePage,
    }
}

// Returns the trimmed homepage if it is a usable http(s) URL
fn valid_homepage(homepage: &str) -> Option<&str> {
    // Owners often leave stray spaces around the homepage field
    let trimmed = homepage.trim();

    // Relative text like "example.com" fails to parse, which is what we want
    let url = Url::parse(trimmed).ok()?;

    // ftp:, mailto: etc. parse fine but are not something to open as a demo
    let web = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().map_or(false, |host| !host.is_empty());
    (web && has_host).then_some(trimmed)
}

fn pages_url(owner_login: &str, repo_name: &str) -> Option<String> {
    // github.io hosts are lowercase; Url would lowercase them too, but the
    // host comparison below needs the same spelling
    let owner = owner_login.trim().to_lowercase();
    if owner.is_empty() {
        return None;
    }

    // Fails for logins with characters a host name can't contain (spaces...)
    let mut url = Url::parse(&format!("https://{}.github.io/", owner)).ok()?;

    // Must still be a github.io host, an owner like "evil.com/x" would not be
    if url.host_str()? != format!("{}.github.io", owner) {
        return None;
    }
    // push() percent-encodes the name; the empty segment adds the trailing slash
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(repo_name)
        .push("");
    Some(url.to_string())
}
