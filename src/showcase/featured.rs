// src/showcase/featured.rs
// =============================================================================
// Picks the (at most three) repositories shown in the Featured section.
//
// Three stages run in order. Each one only adds while fewer than three are
// picked, and never replaces an earlier pick:
//
// 1. Manual: names listed in the configuration (case-insensitive), in the
//    order the repositories appear in the input.
// 2. Tagged: "portfolio-featured" appears in the name or in one of the
//    topics (case-insensitive), in input order.
// 3. Ranked: the rest, by `stars * 5 + updated_at seconds`, highest first.
//    Equal scores keep input order (sort_by_key is stable).
//
// A repository is never picked twice (checked by id, then by name).
//
// Rust concepts:
// - Lifetimes: the selection borrows from the input slice ('a), no clones
// - HashSet: O(1) "already picked?" checks
// - std::cmp::Reverse: sort descending with sort_by_key
// =============================================================================

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::github::RepositorySummary;

/// Size of the Featured section.
pub const MAX_FEATURED: usize = 3;

/// Marker looked for in names and topics.
pub const FEATURED_TAG: &str = "portfolio-featured";

const STAR_WEIGHT: i64 = 5;

/// Selects up to three repositories to feature.
///
/// `manual_names` come from the configuration; unknown names are ignored.
pub fn select_featured<'a>(
    repositories: &'a [RepositorySummary],
    manual_names: &[String],
) -> Vec<&'a RepositorySummary> {
    let mut selection = Selection::default();

    // Stage 1: manual names. We walk the repositories (not the names), so
    // picks follow input order whatever order the names were configured in
    let manual: HashSet<String> = manual_names.iter().map(|n| n.to_lowercase()).collect();
    for repo in repositories {
        if manual.contains(&repo.name.to_lowercase()) {
            selection.push(repo);
        }
    }

    // Stage 2: "portfolio-featured" in the name or a topic
    // push() ignores anything already picked and stops at three
    for repo in repositories {
        if is_tagged(repo) {
            selection.push(repo);
        }
    }

    // Stage 3: everything left, best score first
    let mut ranked: Vec<&RepositorySummary> = repositories
        .iter()
        .filter(|repo| !selection.contains(repo))
        .collect();

    // sort_by_key is a stable sort: equal scores keep their input order.
    // Reverse() flips the comparison so the highest score comes first
    ranked.sort_by_key(|repo| Reverse(score(repo)));
    for repo in ranked {
        selection.push(repo);
    }

    selection.picked
}

/// Ranking score: `stars * 5 + last update in epoch seconds`.
pub fn score(repo: &RepositorySummary) -> i64 {
    // Star counts never get near i64::MAX, but u64 -> i64 can't be a plain cast
    let stars = i64::try_from(repo.stargazers_count).unwrap_or(i64::MAX);

    // Saturating math: the "oldest" sentinel date is a large negative number
    stars
        .saturating_mul(STAR_WEIGHT)
        .saturating_add(repo.updated_epoch_seconds())
}

fn is_tagged(repo: &RepositorySummary) -> bool {
    contains_tag(&repo.name) || repo.topics.iter().any(|topic| contains_tag(topic))
}

fn contains_tag(text: &str) -> bool {
    text.to_lowercase().contains(FEATURED_TAG)
}

// Running selection with de-duplication and the size cap
#[derive(Default)]
struct Selection<'a> {
    picked: Vec<&'a RepositorySummary>,
    ids: HashSet<u64>,
    names: HashSet<String>,
}

impl<'a> Selection<'a> {
    fn contains(&self, repo: &RepositorySummary) -> bool {
        self.ids.contains(&repo.id) || self.names.contains(&repo.name)
    }

    fn push(&mut self, repo: &'a RepositorySummary) {
        // Full already, or picked by an earlier stage: later stages never
        // displace or duplicate a pick
        if self.picked.len() >= MAX_FEATURED || self.contains(repo) {
            return;
        }

        // Remember both keys so either one blocks a second pick
        self.ids.insert(repo.id);
        self.names.insert(repo.name.clone());
        self.picked.push(repo);
    }
}
