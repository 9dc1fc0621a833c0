// src/lib.rs
// =============================================================================
// repo-showcase as a library: the binary in main.rs is a thin wrapper, and
// other front ends can use the same pieces.
//
// Modules:
// - cli / config: command line and the immutable Config built from it
// - github: the GitHub REST API client
// - showcase: snippets, featured selection, links, sections
// - render: text and JSON output
// =============================================================================

pub mod cli;
pub mod config;
pub mod github;
pub mod render;
pub mod showcase;

pub use config::Config;
