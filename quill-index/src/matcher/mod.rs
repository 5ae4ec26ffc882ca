//! Query matching against titles and note bodies.
//!
//! Each strategy is a pure function returning an optional [`Candidate`];
//! callers keep whichever candidate scores highest.

pub mod content;
pub mod fuzzy;
pub mod title;

pub use content::{ContentMatch, substring_match, token_match, wiki_link_match};
pub use fuzzy::{FuzzyMatch, fuzzy_match};
pub use title::{TitleMatch, TitleMatchOptions, evaluate_title_match};

use crate::ranges::HighlightRange;
use crate::text::fold;
use crate::tokenizer::query_terms;

/// A query prepared once and reused against every note.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    /// Trimmed query as typed.
    pub trimmed: String,
    /// Trimmed query, lowercased char by char.
    pub folded: Vec<char>,
    /// Query terms, see [`query_terms`].
    pub terms: Vec<Vec<char>>,
}

impl NormalizedQuery {
    /// `None` for an empty or whitespace-only query.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            trimmed: trimmed.to_string(),
            folded: fold(trimmed),
            terms: query_terms(trimmed)
                .iter()
                .map(|term| term.chars().collect())
                .collect(),
        })
    }

    /// Length of the normalized query in chars.
    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn has_multiple_terms(&self) -> bool {
        self.terms.len() > 1
    }
}

/// Score and highlight ranges produced by one strategy.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub score: f64,
    pub ranges: Vec<HighlightRange>,
}

impl Candidate {
    pub fn new(score: f64, ranges: Vec<HighlightRange>) -> Self {
        Self { score, ranges }
    }
}

/// Keep the highest-scoring candidate; ties keep the earlier one and
/// non-positive scores never win.
pub(crate) fn best_of<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Option<Candidate>>,
{
    candidates
        .into_iter()
        .flatten()
        .fold(None, |best: Option<Candidate>, next| match best {
            Some(current) if current.score >= next.score => Some(current),
            _ if next.score > 0.0 => Some(next),
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_query_rejects_blank() {
        assert!(NormalizedQuery::new("").is_none());
        assert!(NormalizedQuery::new("   \t").is_none());
    }

    #[test]
    fn test_normalized_query_folds_and_splits() {
        let query = NormalizedQuery::new("  Budget Review ").expect("query");
        assert_eq!(query.trimmed, "Budget Review");
        assert_eq!(query.folded.iter().collect::<String>(), "budget review");
        assert!(query.has_multiple_terms());
    }

    #[test]
    fn test_best_of_keeps_first_on_tie_and_skips_non_positive() {
        let best = best_of([
            Some(Candidate::new(-5.0, vec![])),
            None,
            Some(Candidate::new(10.0, vec![HighlightRange::new(0, 1)])),
            Some(Candidate::new(10.0, vec![HighlightRange::new(2, 3)])),
        ])
        .expect("best");
        assert_eq!(best.ranges, vec![HighlightRange::new(0, 1)]);
        assert!(best_of([Some(Candidate::new(0.0, vec![]))]).is_none());
    }
}
