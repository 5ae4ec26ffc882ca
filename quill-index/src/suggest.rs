//! Autocomplete suggestions while typing a `[[` link.

use chrono::{DateTime, Utc};
use quill_core::{IndexSettings, Note, format_date_short};

use crate::listing::recent_notes;
use crate::matcher::{NormalizedQuery, TitleMatchOptions, evaluate_title_match};
use crate::models::{LinkSuggestion, SuggestionKind};
use crate::parser::LinkTrigger;
use crate::rank::recency_boost;

const FUZZY_MIN_LEN: usize = 3;
const CREATE_SUBTITLE: &str = "Create new link";

fn updated_subtitle(note: &Note) -> String {
    format!("Updated {}", format_date_short(note.metadata.updated_at))
}

/// Suggestions for the text typed after `[[`.
///
/// An empty query offers the most recently updated notes. Otherwise titles
/// are scored with the title matcher plus a recency boost, and a "create"
/// entry is appended unless some title matched exactly.
pub fn build_link_suggestions(
    notes: &[Note],
    trigger: &LinkTrigger,
    now: DateTime<Utc>,
    settings: &IndexSettings,
) -> Vec<LinkSuggestion> {
    let Some(query) = NormalizedQuery::new(&trigger.query) else {
        return recent_notes(notes, settings.recent_suggestion_limit)
            .into_iter()
            .map(|note| LinkSuggestion {
                title: note.display_title().to_string(),
                subtitle: updated_subtitle(note),
                kind: SuggestionKind::Note,
                note_id: Some(note.id.clone()),
                highlight_ranges: Vec::new(),
            })
            .collect();
    };

    let options = TitleMatchOptions {
        allow_loose_substring: true,
        allow_fuzzy: query.len() >= FUZZY_MIN_LEN,
        require_boundary: query.has_multiple_terms(),
    };

    let mut has_exact = false;
    let mut candidates: Vec<(f64, LinkSuggestion)> = Vec::new();
    for note in notes {
        let title = note.title.trim();
        let Some(matched) = evaluate_title_match(title, &query, options) else {
            continue;
        };
        has_exact |= matched.exact;
        let score = matched.score + recency_boost(note, now, settings);
        candidates.push((
            score,
            LinkSuggestion {
                title: title.to_string(),
                subtitle: updated_subtitle(note),
                kind: SuggestionKind::Note,
                note_id: Some(note.id.clone()),
                highlight_ranges: matched.ranges,
            },
        ));
    }

    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    let mut suggestions: Vec<LinkSuggestion> = candidates
        .into_iter()
        .take(settings.suggestion_limit)
        .map(|(_, suggestion)| suggestion)
        .collect();

    if !has_exact {
        suggestions.push(LinkSuggestion {
            title: query.trimmed.clone(),
            subtitle: CREATE_SUBTITLE.to_string(),
            kind: SuggestionKind::Create,
            note_id: None,
            highlight_ranges: Vec::new(),
        });
    }
    suggestions
}
