//! Recency and overview listings.

use std::cmp::Ordering;

use quill_core::Note;

use crate::models::{HomeEntry, HomeQuery, HomeSort};

const SNIPPET_MAX_CHARS: usize = 140;
const SNIPPET_CUT_CHARS: usize = 137;

/// Most recently updated first; notes without a timestamp sort last.
fn by_updated_desc(a: &Note, b: &Note) -> Ordering {
    match (a.metadata.updated_at, b.metadata.updated_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Up to `limit` notes, most recently updated first. Ties keep collection
/// order.
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<&Note> {
    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| by_updated_desc(a, b));
    sorted.truncate(limit);
    sorted
}

/// Rows for the note overview, optionally only pinned notes.
pub fn home_listing(notes: &[Note], query: HomeQuery) -> Vec<HomeEntry> {
    let mut selected: Vec<&Note> = notes
        .iter()
        .filter(|note| !query.pinned_only || note.metadata.pinned)
        .collect();

    match query.sort {
        HomeSort::Updated => selected.sort_by(|a, b| by_updated_desc(a, b)),
        HomeSort::Alpha => {
            selected.sort_by_cached_key(|note| note.display_title().to_lowercase());
        }
    }

    selected
        .into_iter()
        .map(|note| HomeEntry {
            id: note.id.clone(),
            title: note.display_title().to_string(),
            created_at: note.metadata.created_at,
            updated_at: note.metadata.updated_at,
            pinned: note.metadata.pinned,
            snippet: first_line_snippet(&note.content),
        })
        .collect()
}

/// First non-blank line of `content`, shortened with `…` when long.
pub fn first_line_snippet(content: &str) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    if line.chars().count() <= SNIPPET_MAX_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(SNIPPET_CUT_CHARS).collect();
    cut.push('…');
    cut
}
