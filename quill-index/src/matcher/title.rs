//! Title scoring: exact, word-boundary, loose substring, multi-term and
//! fuzzy strategies, combined by keeping the highest score.

use super::fuzzy::fuzzy_match;
use super::{Candidate, NormalizedQuery, best_of};
use crate::ranges::{HighlightRange, compress_ranges, ranges_from_positions};
use crate::text::{find, find_word_boundary, fold, is_word_boundary};

const EXACT_SCORE: f64 = 620.0;
const BOUNDARY_BASE: f64 = 460.0;
const BOUNDARY_INDEX_PENALTY: f64 = 1.5;
const SUBSTRING_BASE: f64 = 320.0;
const TERM_BASE: f64 = 240.0;
const TERM_INDEX_PENALTY: f64 = 1.2;
const TERM_BOUNDARY_BONUS: f64 = 40.0;
const MULTI_TERM_BONUS: f64 = 80.0;
const FUZZY_BASE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleMatchOptions {
    pub allow_loose_substring: bool,
    pub allow_fuzzy: bool,
    /// Disables the loose substring strategy.
    pub require_boundary: bool,
}

impl Default for TitleMatchOptions {
    fn default() -> Self {
        Self {
            allow_loose_substring: true,
            allow_fuzzy: true,
            require_boundary: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    pub score: f64,
    /// Compressed ranges into the title, in chars.
    pub ranges: Vec<HighlightRange>,
    /// Whether the whole title equals the query (case-insensitive).
    pub exact: bool,
}

/// Score `title` against `query`. Every strategy is evaluated and the highest
/// score wins; `None` when nothing scores above zero or the title is blank.
pub fn evaluate_title_match(
    title: &str,
    query: &NormalizedQuery,
    options: TitleMatchOptions,
) -> Option<TitleMatch> {
    if title.trim().is_empty() || query.is_empty() {
        return None;
    }
    let lower = fold(title);
    let exact = lower == query.folded;

    let best = best_of([
        exact.then(|| Candidate::new(EXACT_SCORE, vec![HighlightRange::span(0, lower.len())])),
        boundary_match(&lower, &query.folded),
        (options.allow_loose_substring && !options.require_boundary)
            .then(|| substring_match(&lower, &query.folded))
            .flatten(),
        query
            .has_multiple_terms()
            .then(|| multi_term_match(&lower, &query.terms))
            .flatten(),
        options
            .allow_fuzzy
            .then(|| fuzzy_title_match(&lower, &query.folded))
            .flatten(),
    ])?;

    Some(TitleMatch {
        score: best.score,
        ranges: compress_ranges(best.ranges),
        exact,
    })
}

fn boundary_match(lower: &[char], needle: &[char]) -> Option<Candidate> {
    let index = find_word_boundary(lower, needle)?;
    Some(Candidate::new(
        BOUNDARY_BASE - index as f64 * BOUNDARY_INDEX_PENALTY,
        vec![HighlightRange::span(index, needle.len())],
    ))
}

fn substring_match(lower: &[char], needle: &[char]) -> Option<Candidate> {
    let index = find(lower, needle)?;
    Some(Candidate::new(
        SUBSTRING_BASE - index as f64,
        vec![HighlightRange::span(index, needle.len())],
    ))
}

/// Every term must occur; each prefers a word-boundary occurrence. The score
/// is the mean per-term score plus a combination bonus.
pub(crate) fn multi_term_match(lower: &[char], terms: &[Vec<char>]) -> Option<Candidate> {
    let terms: Vec<&Vec<char>> = terms.iter().filter(|term| !term.is_empty()).collect();
    if terms.is_empty() {
        return None;
    }

    let mut ranges = Vec::with_capacity(terms.len());
    let mut total = 0.0;
    for term in &terms {
        let index = find_word_boundary(lower, term).or_else(|| find(lower, term))?;
        let bonus = if is_word_boundary(lower, index) {
            TERM_BOUNDARY_BONUS
        } else {
            0.0
        };
        total += TERM_BASE - index as f64 * TERM_INDEX_PENALTY + bonus;
        ranges.push(HighlightRange::span(index, term.len()));
    }

    Some(Candidate::new(
        total / terms.len() as f64 + MULTI_TERM_BONUS,
        ranges,
    ))
}

fn fuzzy_title_match(lower: &[char], needle: &[char]) -> Option<Candidate> {
    let matched = fuzzy_match(lower, needle)?;
    Some(Candidate::new(
        FUZZY_BASE + matched.score,
        ranges_from_positions(&matched.positions),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> NormalizedQuery {
        NormalizedQuery::new(text).expect("query")
    }

    fn score(title: &str, text: &str) -> Option<f64> {
        evaluate_title_match(title, &query(text), TitleMatchOptions::default()).map(|m| m.score)
    }

    #[test]
    fn test_exact_match_wins_with_full_range() {
        let matched = evaluate_title_match(
            "Budget Notes",
            &query("budget notes"),
            TitleMatchOptions::default(),
        )
        .expect("match");
        assert_eq!(matched.score, 620.0);
        assert!(matched.exact);
        assert_eq!(matched.ranges, vec![HighlightRange::new(0, 12)]);
    }

    #[test]
    fn test_boundary_match_scores_by_index() {
        assert_eq!(score("Budget Notes", "budget"), Some(460.0));
        assert_eq!(score("Old Budget", "budget"), Some(460.0 - 4.0 * 1.5));
    }

    #[test]
    fn test_loose_substring_when_not_on_boundary() {
        // "get" is inside "budget": no boundary, loose substring at 3.
        assert_eq!(score("budget", "get"), Some(317.0));

        let strict = TitleMatchOptions {
            require_boundary: true,
            allow_fuzzy: false,
            ..Default::default()
        };
        assert!(evaluate_title_match("budget", &query("get"), strict).is_none());
    }

    #[test]
    fn test_multi_term_requires_every_term() {
        let matched = evaluate_title_match(
            "Quarterly budget review",
            &query("review budget"),
            TitleMatchOptions {
                allow_fuzzy: false,
                ..Default::default()
            },
        )
        .expect("match");
        // review at 17: 240 - 20.4 + 40; budget at 10: 240 - 12 + 40
        let expected = ((240.0 - 17.0 * 1.2 + 40.0) + (240.0 - 10.0 * 1.2 + 40.0)) / 2.0 + 80.0;
        assert!((matched.score - expected).abs() < 1e-9);
        assert_eq!(
            matched.ranges,
            vec![HighlightRange::new(10, 16), HighlightRange::new(17, 23)]
        );

        assert!(
            evaluate_title_match(
                "Quarterly budget",
                &query("review budget"),
                TitleMatchOptions {
                    allow_fuzzy: false,
                    ..Default::default()
                },
            )
            .is_none()
        );
    }

    #[test]
    fn test_fuzzy_subsequence() {
        // p-r-j scattered in "project": no substring or boundary hit.
        let matched = evaluate_title_match("project", &query("prj"), TitleMatchOptions::default())
            .expect("match");
        assert_eq!(matched.score, 180.0 + 80.0 - 4.0);
        assert_eq!(
            matched.ranges,
            vec![HighlightRange::new(0, 2), HighlightRange::new(3, 4)]
        );

        let no_fuzzy = TitleMatchOptions {
            allow_fuzzy: false,
            ..Default::default()
        };
        assert!(evaluate_title_match("project", &query("prj"), no_fuzzy).is_none());
    }

    #[test]
    fn test_exact_beats_every_partial_query() {
        let title = "Weekly Planning Notes";
        let exact = score(title, title).expect("exact");
        for partial in ["weekly", "planning", "notes", "plan", "wkly", "notes weekly", "eekly"] {
            let partial_score = score(title, partial).expect("partial");
            assert!(exact > partial_score, "{partial} scored {partial_score}");
        }
    }

    #[test]
    fn test_blank_title_never_matches() {
        assert!(score("   ", "a").is_none());
    }
}
