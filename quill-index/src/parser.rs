use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("wiki-link regex"));

/// A `[[Title]]` occurrence in a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Inner text, trimmed.
    pub target: String,
}

/// Every non-empty `[[...]]` target in `body`, in order of appearance.
pub fn extract_links(body: &str) -> Vec<WikiLink> {
    WIKI_LINK
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|inner| inner.as_str().trim())
        .filter(|target| !target.is_empty())
        .map(|target| WikiLink {
            target: target.to_string(),
        })
        .collect()
}

/// A partially typed `[[` link ending at the caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTrigger {
    /// Char offset of the opening `[[`.
    pub start: usize,
    /// Char offset of the caret.
    pub cursor: usize,
    /// Text typed after `[[`, untrimmed.
    pub query: String,
}

impl LinkTrigger {
    /// A trigger carrying only a query, for callers that track the caret themselves.
    pub fn from_query(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.chars().count() + 2;
        Self {
            start: 0,
            cursor,
            query,
        }
    }

    /// Detect an open `[[` before `cursor` (a char offset into `text`).
    ///
    /// Returns `None` when there is no `[[` before the caret, or when the text
    /// between it and the caret closes the link, opens another one, or spans
    /// a line break.
    pub fn detect(text: &str, cursor: usize) -> Option<Self> {
        let chars: Vec<char> = text.chars().collect();
        let cursor = cursor.min(chars.len());
        let before = &chars[..cursor];
        let start = before.windows(2).rposition(|pair| pair == ['[', '['])?;
        let typed = &chars[start + 2..cursor];

        let closes = typed.windows(2).any(|pair| pair == [']', ']'] || pair == ['[', '[']);
        if closes || typed.contains(&'\n') {
            return None;
        }

        Some(Self {
            start,
            cursor,
            query: typed.iter().collect(),
        })
    }
}
