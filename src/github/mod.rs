// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Submodules:
// - client: the two API requests (repository list, README)
// - models: the JSON shapes we read
// - error: how a failed repository-list request is classified
//
// Rust concepts:
// - Modules: Organizing related functionality
// - pub use: Re-export items so callers write `github::GithubClient`
// =============================================================================

mod client;
mod error;
mod models;

pub use client::{GithubClient, PAGE_SIZE};
pub use error::FetchError;
pub use models::{Readme, RepositorySummary};

#[cfg(test)]
pub(crate) use models::fixtures;

/// An address nothing listens on, for transport-failure tests.
///
/// The port is bound and released right away, so connecting to it is refused.
#[cfg(test)]
pub(crate) fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
