// src/showcase/sections.rs
// =============================================================================
// Builds the three sections of the showcase from the repository list.
//
// How one render pass goes:
// 1. Optional filters (forks, archived) are applied.
// 2. Repositories are sorted by last update, newest first (stable sort).
// 3. One card is built per repository. READMEs are fetched a few at a time,
//    but `buffered` hands the results back in input order.
// 4. Featured = up to 3 cards chosen by featured.rs.
//    Categories = cards grouped by language, in order of first appearance.
//    All = every card.
//
// Each README is fetched once and the card is shared by every section it
// shows up in. Nothing outlives the render pass.
//
// Rust concepts:
// - Streams: .buffered(n) runs up to n futures at once, yielding in order
// - Serialize derive: the records below are what --json prints
// - HashMap entry API: find-or-create a category in one lookup
// =============================================================================

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use serde::Serialize;
use tracing::{debug, info};

use super::featured::select_featured;
use super::links::{resolve_code_target, resolve_live_target, ResolvedLink};
use super::snippet::Snippet;
use crate::config::Config;
use crate::github::{FetchError, GithubClient, RepositorySummary};

/// Everything a renderer needs for one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    /// `None` when GitHub's timestamp could not be read
    pub updated_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub live: ResolvedLink,
    pub code: ResolvedLink,
    pub snippet: Snippet,
}

impl ProjectCard {
    /// Card for `repo` with an already fetched snippet.
    pub fn new(repo: &RepositorySummary, owner: &str, snippet: Snippet) -> Self {
        let updated_at = (repo.updated_at != DateTime::<Utc>::MIN_UTC).then_some(repo.updated_at);
        ProjectCard {
            id: repo.id,
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stargazers_count,
            updated_at,
            topics: repo.topics.clone(),
            live: resolve_live_target(repo, owner),
            code: resolve_code_target(repo),
            snippet,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySection {
    pub name: String,
    pub projects: Vec<ProjectCard>,
}

/// The full output of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct Showcase {
    pub owner: String,
    /// Message shown above the (empty) sections when loading failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub featured: Vec<ProjectCard>,
    pub categories: Vec<CategorySection>,
    pub projects: Vec<ProjectCard>,
}

impl Showcase {
    /// Empty showcase with a banner explaining why nothing loaded.
    pub fn unavailable(owner: &str, error: &FetchError) -> Self {
        let banner = match error {
            FetchError::RateLimited => {
                "GitHub's API rate limit was reached, so projects could not be loaded. \
                 Try again later, or pass a personal access token with --token (or GITHUB_TOKEN)."
                    .to_string()
            }
            FetchError::FetchFailed { .. } => {
                format!("Projects could not be loaded from GitHub: {}.", error)
            }
        };
        Showcase {
            owner: owner.to_string(),
            banner: Some(banner),
            featured: Vec::new(),
            categories: Vec::new(),
            projects: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.banner.is_some()
    }
}

/// Fetches the repository list and builds every section.
///
/// Only the list request can fail; README problems just leave a card
/// without a snippet.
pub async fn load_showcase(client: &GithubClient, config: &Config) -> Result<Showcase, FetchError> {
    let repositories = client.fetch_repository_list().await?;
    info!(count = repositories.len(), owner = %config.owner, "repositories loaded");
    Ok(build_showcase(client, config, repositories).await)
}

/// Builds the sections from an already fetched repository list.
pub async fn build_showcase(
    client: &GithubClient,
    config: &Config,
    repositories: Vec<RepositorySummary>,
) -> Showcase {
    let mut repositories = filter_repositories(repositories, config);
    sort_by_recency(&mut repositories);

    let concurrency = if config.fetch_snippets { config.readme_concurrency } else { 0 };
    let cards = build_cards(client, &repositories, concurrency).await;

    let index: HashMap<u64, usize> = cards.iter().enumerate().map(|(i, card)| (card.id, i)).collect();
    let featured = select_featured(&repositories, &config.featured)
        .into_iter()
        .filter_map(|repo| index.get(&repo.id).map(|&i| cards[i].clone()))
        .collect();

    Showcase {
        owner: config.owner.clone(),
        banner: None,
        featured,
        categories: group_by_category(&cards),
        projects: cards,
    }
}

/// Drops forks and/or archived repositories when the configuration asks for it.
pub fn filter_repositories(
    repositories: Vec<RepositorySummary>,
    config: &Config,
) -> Vec<RepositorySummary> {
    repositories
        .into_iter()
        .filter(|repo| !(config.skip_forks && repo.fork))
        .filter(|repo| !(config.skip_archived && repo.archived))
        .collect()
}

/// Newest first; equal timestamps keep their order.
pub fn sort_by_recency(repositories: &mut [RepositorySummary]) {
    repositories.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Builds one card per repository, in input order.
///
/// `concurrency` bounds the README requests in flight; 0 skips READMEs
/// entirely and leaves every snippet unavailable.
pub async fn build_cards(
    client: &GithubClient,
    repositories: &[RepositorySummary],
    concurrency: usize,
) -> Vec<ProjectCard> {
    let owner = client.owner();

    // READMEs turned off: no network at all, every snippet is unavailable
    if concurrency == 0 {
        return repositories
            .iter()
            .map(|repo| ProjectCard::new(repo, owner, Snippet::Unavailable))
            .collect();
    }

    // One future per repository. Nothing runs yet: futures are lazy until
    // the stream below polls them. `async move` copies the borrowed client,
    // repo and owner references into each future
    let futures = repositories.iter().map(|repo| async move {
        // fetch_readme never fails; a missing README is Readme::NotAvailable
        let readme = client.fetch_readme(&repo.name).await;
        let snippet = Snippet::from_readme(&readme);
        debug!(repository = %repo.name, has_snippet = !snippet.is_empty(), "card built");
        ProjectCard::new(repo, owner, snippet)
    });

    // buffered (not buffer_unordered): at most `concurrency` requests in
    // flight, but results come back in input order, so card order always
    // matches the recency-sorted list
    stream::iter(futures).buffered(concurrency).collect().await
}

/// Groups cards by language ("Other" when unknown), keeping card order.
pub fn group_by_category(cards: &[ProjectCard]) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for card in cards {
        let name = match card.language.as_deref() {
            Some(language) if !language.trim().is_empty() => language.to_string(),
            _ => "Other".to_string(),
        };
        // First time we see a language, append a new section and remember
        // its index; that keeps sections in order of first appearance
        let position = *positions.entry(name.clone()).or_insert_with(|| {
            sections.push(CategorySection { name, projects: Vec::new() });
            sections.len() - 1
        });
        sections[position].projects.push(card.clone());
    }

    sections
}
