// src/render.rs
// =============================================================================
// Turns a Showcase into text for the terminal, or into JSON.
//
// The text listing is meant for a quick look; the JSON output carries the
// same records (cards, resolved links, snippets) for any other front end to
// render however it likes.
// =============================================================================

use std::fmt;

use anyhow::Result;

use crate::showcase::{LinkKind, ProjectCard, Showcase};

// Long descriptions are cut in the listing (JSON keeps them whole)
const DESCRIPTION_WIDTH: usize = 80;

/// Pretty-printed JSON of the whole showcase.
pub fn render_json(showcase: &Showcase) -> Result<String> {
    Ok(serde_json::to_string_pretty(showcase)?)
}

/// Human-readable listing with the three sections.
pub fn render_text(showcase: &Showcase) -> String {
    // to_string() comes for free with the Display impl below
    TextListing(showcase).to_string()
}

// Wrapper so the listing can be written with writeln!(f, ...)? through
// fmt::Display instead of pushing into a String by hand
struct TextListing<'a>(&'a Showcase);

impl fmt::Display for TextListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let showcase = self.0;

        writeln!(f, "📁 Projects of {}", showcase.owner)?;
        writeln!(f, "{}", "=".repeat(60))?;

        // Only present when the repository list could not be loaded
        if let Some(banner) = &showcase.banner {
            writeln!(f, "⚠️  {}", banner)?;
            writeln!(f)?;
        }

        writeln!(f, "⭐ Featured")?;
        if showcase.featured.is_empty() {
            writeln!(f, "   (nothing to feature)")?;
        }
        for card in &showcase.featured {
            write_card(f, card)?;
        }
        writeln!(f)?;

        // Categories only list names; the full cards follow in "All projects"
        writeln!(f, "🗂️  By category")?;
        if showcase.categories.is_empty() {
            writeln!(f, "   (no categories)")?;
        }
        for section in &showcase.categories {
            writeln!(f, "   {} ({})", section.name, section.projects.len())?;
            for card in &section.projects {
                writeln!(f, "      - {}", card.name)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "📋 All projects ({})", showcase.projects.len())?;
        for card in &showcase.projects {
            write_card(f, card)?;
        }

        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, card: &ProjectCard) -> fmt::Result {
    let language = card.language.as_deref().unwrap_or("Other");
    let updated = card
        .updated_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    writeln!(
        f,
        "   {} (★ {}, {}, updated {})",
        card.name, card.stars, language, updated
    )?;
    if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(f, "      {}", shorten(description, DESCRIPTION_WIDTH))?;
    }
    writeln!(f, "      {} {}", format_kind(card.live.kind), card.live.url)?;
    writeln!(f, "      {} {}", format_kind(card.code.kind), card.code.url)?;

    // Unavailable snippets print as "", so they are skipped here
    if !card.snippet.is_empty() {
        writeln!(f, "      “{}”", card.snippet.as_str())?;
    }
    Ok(())
}

fn format_kind(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::LiveDemo => "🌐 Live:",
        LinkKind::PagesGuess => "🌐 Pages (guess):",
        LinkKind::CodePage => "💻 Code:",
    }
}

// Cuts on a character boundary, never inside a multi-byte character
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
