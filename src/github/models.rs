// src/github/models.rs
// =============================================================================
// Data we read from the GitHub REST API.
//
// Only the fields the showcase uses are declared; serde ignores the rest of
// the (very large) repository object.
//
// Rust concepts:
// - serde derive with per-field defaults
// - A custom deserializer for a field that must never fail to parse
// =============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One repository from `GET /users/{owner}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language; `None` goes into the "Other" category
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    /// Free text set by the owner, may or may not be a URL
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
    /// Missing or unparseable timestamps become `DateTime::<Utc>::MIN_UTC`
    #[serde(default = "oldest", deserialize_with = "lenient_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

impl RepositorySummary {
    /// Seconds since the Unix epoch of the last update (negative for the
    /// "oldest" sentinel).
    pub fn updated_epoch_seconds(&self) -> i64 {
        self.updated_at.timestamp()
    }

    /// Language used for grouping.
    pub fn category(&self) -> &str {
        match self.language.as_deref() {
            Some(language) if !language.trim().is_empty() => language,
            _ => "Other",
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/readme` (only the part we need).
#[derive(Debug, Deserialize)]
pub(crate) struct ReadmeResponse {
    pub content: String,
}

/// Outcome of a README request.
///
/// A repository without a README is normal, so "not available" is a value
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readme {
    /// Raw `content` field, still base64 with embedded newlines
    Available(String),
    NotAvailable,
}

fn oldest() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

// Accepts any JSON value; anything that is not an ISO-8601 string is "oldest"
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    // Deserialize as a generic value first, so numbers or objects don't fail
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_timestamp).unwrap_or_else(oldest))
}

/// Parses the ISO-8601 forms we may get back.
///
/// Tried in order:
/// - RFC 3339 with an offset ("2024-06-01T12:00:00Z", what GitHub sends)
/// - date and time without an offset ("2024-06-01T12:00:00"), read as UTC
/// - a bare date ("2024-06-01"), read as midnight UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // %.f also accepts (and skips) missing fractional seconds
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": "This your first repo!",
            "language": "Rust",
            "stargazers_count": 80,
            "homepage": "https://github.com",
            "html_url": "https://github.com/octocat/Hello-World",
            "updated_at": "2011-01-26T19:14:43Z",
            "topics": ["octocat", "api"],
            "fork": false,
            "archived": true
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();

        assert_eq!(repo.id, 1296269);
        assert_eq!(repo.category(), "Rust");
        assert_eq!(repo.topics, vec!["octocat", "api"]);
        assert_eq!(repo.updated_epoch_seconds(), 1296069283);
        assert!(repo.archived);
    }

    #[test]
    fn test_bad_timestamp_is_oldest() {
        let repo = fixtures::repo(1, "a", 0, "not a date");
        assert_eq!(repo.updated_at, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_other_iso_8601_forms() {
        let date_only = fixtures::repo(1, "a", 0, "2024-01-01");
        assert_eq!(date_only.updated_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let no_offset = fixtures::repo(2, "b", 0, "2024-06-01T12:00:00");
        assert_eq!(no_offset.updated_at.to_rfc3339(), "2024-06-01T12:00:00+00:00");

        let fraction = fixtures::repo(3, "c", 0, "2024-06-01T12:00:00.250");
        assert_eq!(fraction.updated_epoch_seconds(), no_offset.updated_epoch_seconds());

        let offset = fixtures::repo(4, "d", 0, "2024-06-01T14:00:00+02:00");
        assert_eq!(offset.updated_at, no_offset.updated_at);
    }

    #[test]
    fn test_parse_timestamp_rejects_junk() {
        for text in ["", "yesterday", "2024-13-01", "2024-02-30", "01/02/2024"] {
            assert!(parse_timestamp(text).is_none(), "{}", text);
        }
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"id": 7, "name": "x", "html_url": "https://github.com/o/x",
                       "language": null, "topics": null, "homepage": null}"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();

        assert_eq!(repo.category(), "Other");
        assert!(repo.topics.is_empty());
        assert!(repo.homepage.is_none());
        assert_eq!(repo.updated_at, DateTime::<Utc>::MIN_UTC);
    }
}
