//! Note model shared by the store, the index and the CLI.
//!
//! Notes are owned by whatever keeps the collection (the `Notebook` in
//! `quill-index`); the ranking code only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Display label for notes without a title.
pub const UNTITLED: &str = "Untitled";

/// A single note: a title, a free-text body that may embed `[[Title]]`
/// links, and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: NoteMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auto_tags: Vec<String>,
}

/// Input for creating or updating a note through the store.
///
/// A draft whose `id` matches an existing note updates it; anything else
/// creates a new note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: Option<bool>,
}

impl Note {
    /// Create a fresh note stamped with `now`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            metadata: NoteMetadata {
                created_at: Some(now),
                updated_at: Some(now),
                pinned: false,
                auto_tags: auto_tags_for(now),
            },
        }
    }

    /// Title as shown to a user, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Title key used for lookups and link resolution, `None` when blank.
    pub fn title_key(&self) -> Option<String> {
        let key = normalize_title(&self.title);
        (!key.is_empty()).then_some(key)
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.updated_at
    }
}

/// Trim + lowercase, the normalization used for titles and link targets.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Automatic tags recorded on every save: day, time and weekday.
pub fn auto_tags_for(at: DateTime<Utc>) -> Vec<String> {
    vec![
        format!("#{}", at.format("%Y-%m-%d")),
        format!("#{}", at.format("%H:%M")),
        format!("#{}", at.format("%a").to_string().to_lowercase()),
    ]
}

/// Short human timestamp, e.g. `Mar 4 09:05`. Absent timestamps render as `—`.
pub fn format_date_short(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%b %-d %H:%M").to_string(),
        None => "—".to_string(),
    }
}

/// Accepts RFC 3339 strings or epoch milliseconds; anything else becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(value)) => DateTime::parse_from_rfc3339(value.trim())
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Some(serde_json::Value::Number(value)) => {
            value.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis)
        }
        _ => None,
    })
}
