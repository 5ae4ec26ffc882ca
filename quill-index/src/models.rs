use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::{Note, format_date_short};

use crate::ranges::HighlightRange;

/// A note whose body links to another note's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    pub source_id: String,
    pub source_title: String,
}

/// A distinct `[[link]]` of a note and whether its target exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingLink {
    pub label: String,
    pub exists: bool,
}

/// Options for full-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum number of hits; the configured search limit when unset.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only match titles.
    #[serde(default)]
    pub title_only: bool,
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn titles_only() -> Self {
        Self {
            title_only: true,
            ..Default::default()
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub highlight_ranges: Vec<HighlightRange>,
    pub updated_at: Option<DateTime<Utc>>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Link to an existing note.
    Note,
    /// Create a new note with the typed title.
    Create,
}

/// One entry of the `[[` autocomplete list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSuggestion {
    pub title: String,
    pub subtitle: String,
    pub kind: SuggestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_ranges: Vec<HighlightRange>,
}

/// A note ranked by similarity to another note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarNote {
    pub note: Note,
    pub score: f64,
    /// Up to three shared similarity tokens, for display.
    pub shared_tokens: Vec<String>,
    /// Labels of every link target both notes reference.
    pub shared_links: Vec<String>,
}

impl SimilarNote {
    /// One-line explanation, e.g. `Links: [[Budget]] · Words: garden, tomato`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.shared_links.is_empty() {
            let links: Vec<String> = self
                .shared_links
                .iter()
                .take(2)
                .map(|label| format!("[[{label}]]"))
                .collect();
            parts.push(format!("Links: {}", links.join(", ")));
        }
        if !self.shared_tokens.is_empty() {
            let words: Vec<&str> = self.shared_tokens.iter().take(3).map(String::as_str).collect();
            parts.push(format!("Words: {}", words.join(", ")));
        }
        if parts.is_empty() {
            parts.push(format!(
                "Updated {}",
                format_date_short(self.note.metadata.updated_at)
            ));
        }
        parts.join(" · ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeSort {
    /// Most recently updated first.
    #[default]
    Updated,
    /// Case-insensitive by title.
    Alpha,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeQuery {
    #[serde(default)]
    pub sort: HomeSort,
    #[serde(default)]
    pub pinned_only: bool,
}

/// One row of the note overview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeEntry {
    pub id: String,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pinned: bool,
    /// First non-blank line of the body, shortened.
    pub snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn similar(tokens: &[&str], links: &[&str]) -> SimilarNote {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        SimilarNote {
            note: Note::new("n", "Note", "", at),
            score: 1.0,
            shared_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            shared_links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_lists_links_then_words() {
        let entry = similar(&["garden", "tomato"], &["Budget", "Plan", "Extra"]);
        assert_eq!(
            entry.summary(),
            "Links: [[Budget]], [[Plan]] · Words: garden, tomato"
        );
    }

    #[test]
    fn test_summary_falls_back_to_updated() {
        assert_eq!(similar(&[], &[]).summary(), "Updated Jun 1 08:30");
    }

    #[test]
    fn test_suggestion_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SuggestionKind::Create).unwrap();
        assert_eq!(json, "\"create\"");
    }
}
