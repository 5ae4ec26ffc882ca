//! Tokenizers for similarity scoring and query-term extraction.
//!
//! Both lowercase the text and split it on runs of non-alphanumeric chars;
//! they differ only in which tokens they keep.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::text::{fold, is_word_char};

const STOPWORD_LIST: &[&str] = &[
    "the", "and", "for", "that", "with", "from", "this", "have", "would", "there", "their",
    "about", "could", "into", "such", "over", "were", "just", "your", "them", "more", "when",
    "like", "than", "some", "other", "what", "which", "while", "where", "been", "also",
    "because", "only", "every", "after", "before", "through", "though", "here", "they", "then",
    "much", "many", "well", "each", "most", "very", "good", "back", "even", "make", "made",
    "time", "same",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

/// Minimum length (exclusive) of a similarity token.
const SIMILARITY_MIN_LEN: usize = 4;
/// Minimum length (exclusive) of a filtered query term.
const QUERY_TERM_MIN_LEN: usize = 2;

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Lowercased alphanumeric runs of `text`, in order, including short words.
pub fn raw_tokens(text: &str) -> Vec<String> {
    let folded = fold(text);
    folded
        .split(|c| !is_word_char(*c))
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().collect())
        .collect()
}

/// Tokens used for token frequency, document frequency and similarity:
/// longer than four chars and not a stopword.
pub fn similarity_tokens(text: &str) -> Vec<String> {
    raw_tokens(text)
        .into_iter()
        .filter(|token| token.chars().count() > SIMILARITY_MIN_LEN && !is_stopword(token))
        .collect()
}

/// Terms for multi-term matching: longer than two chars and not a stopword.
///
/// When filtering would drop everything the unfiltered tokens are returned,
/// so a query made only of short words still yields terms.
pub fn query_terms(query: &str) -> Vec<String> {
    let raw = raw_tokens(query);
    if raw.is_empty() {
        return raw;
    }
    let filtered: Vec<String> = raw
        .iter()
        .filter(|token| token.chars().count() > QUERY_TERM_MIN_LEN && !is_stopword(token))
        .cloned()
        .collect();
    if filtered.is_empty() { raw } else { filtered }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_tokens_filter_short_and_stopwords() {
        let tokens = similarity_tokens("The Garden plans, which GARDEN beds? Every tomato!");
        assert_eq!(tokens, vec!["garden", "plans", "garden", "tomato"]);
    }

    #[test]
    fn test_query_terms_filter() {
        assert_eq!(query_terms("the budget for Q3 planning"), vec!["budget", "planning"]);
        assert_eq!(query_terms("  "), Vec::<String>::new());
    }

    #[test]
    fn test_query_terms_fall_back_to_raw_tokens() {
        assert_eq!(query_terms("to do"), vec!["to", "do"]);
        assert_eq!(query_terms("the"), vec!["the"]);
    }

    #[test]
    fn test_common_words_outside_the_stopword_set_are_kept() {
        assert_eq!(STOPWORDS.len(), 55);
        assert_eq!(
            similarity_tokens("should itself these those under until being again yours"),
            vec!["should", "itself", "these", "those", "under", "until", "being", "again", "yours"]
        );
        assert_eq!(query_terms("will does budget"), vec!["will", "does", "budget"]);
    }

    #[test]
    fn test_raw_tokens_split_on_punctuation() {
        assert_eq!(raw_tokens("[[Project-Plan]] v2"), vec!["project", "plan", "v2"]);
    }
}
