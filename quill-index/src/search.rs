//! Full-text search over titles and bodies.

use quill_core::{IndexSettings, Note};

use crate::matcher::{
    NormalizedQuery, TitleMatchOptions, evaluate_title_match, substring_match, token_match,
    wiki_link_match,
};
use crate::models::{SearchHit, SearchOptions};
use crate::ranges::HighlightRange;

const TITLE_BONUS: f64 = 60.0;
const TITLE_FUZZY_MIN_LEN: usize = 3;

/// Best-scoring strategy for one note.
struct Scored {
    score: f64,
    snippet: String,
    ranges: Vec<HighlightRange>,
}

/// Rank `notes` against `query`, best first, truncated to the limit.
///
/// An empty or whitespace-only query returns nothing. Ties keep collection
/// order.
pub fn search_notes(
    notes: &[Note],
    query: &str,
    options: &SearchOptions,
    settings: &IndexSettings,
) -> Vec<SearchHit> {
    let Some(query) = NormalizedQuery::new(query) else {
        return Vec::new();
    };
    let limit = options.limit.unwrap_or(settings.search_limit);

    let mut hits: Vec<SearchHit> = notes
        .iter()
        .filter_map(|note| {
            let scored = score_note(note, &query, options.title_only, settings.snippet_radius)?;
            Some(SearchHit {
                id: note.id.clone(),
                title: note.display_title().to_string(),
                snippet: scored.snippet,
                highlight_ranges: scored.ranges,
                updated_at: note.metadata.updated_at,
                score: scored.score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(limit);

    tracing::debug!(query = %query.trimmed, hits = hits.len(), "Searched notes");
    hits
}

fn score_note(
    note: &Note,
    query: &NormalizedQuery,
    title_only: bool,
    radius: usize,
) -> Option<Scored> {
    let title_options = TitleMatchOptions {
        allow_loose_substring: true,
        allow_fuzzy: query.len() >= TITLE_FUZZY_MIN_LEN,
        require_boundary: false,
    };

    let mut best = evaluate_title_match(&note.title, query, title_options).map(|matched| Scored {
        score: matched.score + TITLE_BONUS,
        snippet: note.title.clone(),
        ranges: matched.ranges,
    });

    if !title_only {
        let mut consider = |score: f64, snippet: String, ranges: Vec<HighlightRange>| {
            let current = best.as_ref().map_or(0.0, |scored| scored.score);
            if score >= current {
                best = Some(Scored {
                    score,
                    snippet,
                    ranges,
                });
                true
            } else {
                false
            }
        };

        if let Some(link) = wiki_link_match(&note.content, query) {
            consider(link.score, link.snippet, link.ranges);
        }

        let substring_won = substring_match(&note.content, query, radius)
            .is_some_and(|found| consider(found.score, found.snippet, found.ranges));

        if !substring_won && query.has_multiple_terms() {
            if let Some(tokens) = token_match(&note.content, &query.terms, radius) {
                consider(tokens.score, tokens.snippet, tokens.ranges);
            }
        }
    }

    best.filter(|scored| scored.score > 0.0)
}
