//! Body scoring: wiki-link occurrences, plain substring and multi-token
//! occurrence. Each strategy yields a snippet with highlight ranges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::NormalizedQuery;
use super::title::{TitleMatchOptions, evaluate_title_match};
use crate::parser::extract_links;
use crate::ranges::{HighlightRange, extract_snippet};
use crate::text::{find, fold};

const WIKI_LINK_BONUS: f64 = 40.0;
const WIKI_LINK_FUZZY_MIN_LEN: usize = 4;
const SUBSTRING_BASE: f64 = 180.0;
const SUBSTRING_INDEX_PENALTY: f64 = 0.5;
const SUBSTRING_FLOOR: f64 = 40.0;
const TOKEN_BASE: f64 = 130.0;
const TOKEN_INDEX_PENALTY: f64 = 0.4;
const TOKEN_COUNT_BONUS: f64 = 8.0;
const TOKEN_FLOOR: f64 = 30.0;

/// Chars added in front of a link title by the opening brackets.
const LINK_OPEN_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMatch {
    pub snippet: String,
    pub ranges: Vec<HighlightRange>,
    pub score: f64,
}

/// Best `[[Title]]` occurrence in `content`, scored with the title matcher
/// plus a bonus. The snippet is the bracketed link.
pub fn wiki_link_match(content: &str, query: &NormalizedQuery) -> Option<ContentMatch> {
    let options = TitleMatchOptions {
        allow_loose_substring: true,
        allow_fuzzy: query.len() >= WIKI_LINK_FUZZY_MIN_LEN,
        require_boundary: query.has_multiple_terms(),
    };

    let mut best: Option<ContentMatch> = None;
    for link in extract_links(content) {
        let Some(evaluation) = evaluate_title_match(&link.target, query, options) else {
            continue;
        };
        let score = evaluation.score + WIKI_LINK_BONUS;
        if best.as_ref().is_some_and(|current| current.score >= score) {
            continue;
        }
        best = Some(ContentMatch {
            snippet: format!("[[{}]]", link.target),
            ranges: evaluation
                .ranges
                .into_iter()
                .map(|range| range.shifted(LINK_OPEN_LEN))
                .collect(),
            score,
        });
    }
    best
}

/// First case-insensitive occurrence of the whole query in `content`.
pub fn substring_match(
    content: &str,
    query: &NormalizedQuery,
    radius: usize,
) -> Option<ContentMatch> {
    let lower = fold(content);
    let index = find(&lower, &query.folded)?;
    let positions: Vec<usize> = (index..index + query.folded.len()).collect();
    let snippet = extract_snippet(content, &positions, radius);

    Some(ContentMatch {
        snippet: snippet.text,
        ranges: snippet.ranges,
        score: (SUBSTRING_BASE - index as f64 * SUBSTRING_INDEX_PENALTY).max(SUBSTRING_FLOOR),
    })
}

/// Every distinct term must occur somewhere in `content`, in any order.
pub fn token_match(content: &str, terms: &[Vec<char>], radius: usize) -> Option<ContentMatch> {
    let mut seen = HashSet::new();
    let unique: Vec<&Vec<char>> = terms
        .iter()
        .filter(|term| !term.is_empty() && seen.insert(term.as_slice()))
        .collect();
    if unique.is_empty() {
        return None;
    }

    let lower = fold(content);
    let mut positions = Vec::new();
    let mut earliest = usize::MAX;
    for term in &unique {
        let index = find(&lower, term)?;
        earliest = earliest.min(index);
        positions.extend(index..index + term.len());
    }
    let snippet = extract_snippet(content, &positions, radius);

    let score = TOKEN_BASE - earliest as f64 * TOKEN_INDEX_PENALTY
        + unique.len() as f64 * TOKEN_COUNT_BONUS;
    Some(ContentMatch {
        snippet: snippet.text,
        ranges: snippet.ranges,
        score: score.max(TOKEN_FLOOR),
    })
}
