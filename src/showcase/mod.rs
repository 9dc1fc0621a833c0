// src/showcase/mod.rs
// =============================================================================
// This module turns a list of repositories into the showcase sections.
//
// Submodules:
// - snippet: README -> short plain-text preview
// - featured: which (up to) three projects are highlighted
// - links: where a card's live and code links point
// - sections: builds Featured / By category / All from the pieces above
// =============================================================================

mod featured;
mod links;
mod sections;
mod snippet;

pub use featured::{score, select_featured, FEATURED_TAG, MAX_FEATURED};
pub use links::{resolve_code_target, resolve_live_target, LinkKind, ResolvedLink};
pub use sections::{
    build_cards, build_showcase, filter_repositories, group_by_category, load_showcase,
    sort_by_recency, CategorySection, ProjectCard, Showcase,
};
pub use snippet::{clean_text, decode_content, extract_snippet, Snippet, MAX_SNIPPET_CHARS};
