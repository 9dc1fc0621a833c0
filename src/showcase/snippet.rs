// src/showcase/snippet.rs
// =============================================================================
// Turns a README into a short plain-text preview for a project card.
//
// Steps:
// 1. GitHub sends the README base64-encoded, wrapped at 60 columns, so we
//    drop the line breaks and decode it.
// 2. Markdown punctuation (#, *, _, `, >, ~, -, [, ], (, )) becomes spaces.
// 3. Whitespace runs collapse to one space, ends are trimmed.
// 4. Anything past 200 characters is cut and an ellipsis added.
//
// Nothing here can fail: bad input just produces less (or no) text.
// =============================================================================

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Serialize, Serializer};

use crate::github::Readme;

/// Longest preview, in characters, before the ellipsis.
pub const MAX_SNIPPET_CHARS: usize = 200;

const ELLIPSIS: char = '\u{2026}';

const MARKDOWN_CHARS: [char; 11] = ['#', '_', '*', '`', '>', '~', '-', '[', ']', '(', ')'];

// Standard alphabet, padding optional
const README_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Preview text shown on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snippet {
    Text(String),
    /// No README could be fetched (or fetching was turned off)
    Unavailable,
}

impl Snippet {
    pub fn from_readme(readme: &Readme) -> Snippet {
        match readme {
            Readme::Available(content) => Snippet::Text(extract_snippet(content)),
            Readme::NotAvailable => Snippet::Unavailable,
        }
    }

    /// The text to display; empty when unavailable.
    pub fn as_str(&self) -> &str {
        match self {
            Snippet::Text(text) => text,
            Snippet::Unavailable => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

// Renderers only ever want the text
impl Serialize for Snippet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Decodes and cleans a README `content` field into a preview.
pub fn extract_snippet(raw: &str) -> String {
    clean_text(&decode_content(raw))
}

/// Base64-decodes README content, ignoring embedded line breaks.
///
/// Returns an empty string when the payload is not valid base64.
pub fn decode_content(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match README_ENGINE.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

/// Strips markdown punctuation, collapses whitespace and caps the length.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if MARKDOWN_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= MAX_SNIPPET_CHARS {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(MAX_SNIPPET_CHARS).collect();
    truncated.push(ELLIPSIS);
    truncated
}
