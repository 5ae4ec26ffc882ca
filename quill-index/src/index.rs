//! Derived lookup structures, built in one pass over the note collection.

use std::collections::{BTreeMap, HashMap};

use quill_core::{Note, normalize_title};

use crate::models::Backlink;
use crate::parser::extract_links;
use crate::tokenizer::similarity_tokens;

/// Title lookup, backlink graph, token statistics and link graph for one
/// snapshot of the note collection.
///
/// A pure function of the notes it was built from; it is never patched,
/// only rebuilt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedIndex {
    note_count: usize,
    /// Normalized title -> note id. Later notes overwrite earlier ones.
    titles: HashMap<String, String>,
    /// Note id -> position in the collection.
    positions: HashMap<String, usize>,
    /// Normalized link target -> linking notes, in collection order.
    backlinks: HashMap<String, Vec<Backlink>>,
    /// Note id -> similarity token counts. Absent for notes without tokens.
    token_frequency: HashMap<String, BTreeMap<String, usize>>,
    /// Token -> number of notes containing it.
    doc_frequency: HashMap<String, usize>,
    /// Note id -> normalized link target -> label as written.
    links: HashMap<String, BTreeMap<String, String>>,
}

impl DerivedIndex {
    pub fn build(notes: &[Note]) -> Self {
        let mut index = Self {
            note_count: notes.len(),
            ..Default::default()
        };

        for (position, note) in notes.iter().enumerate() {
            index.positions.insert(note.id.clone(), position);
            if let Some(key) = note.title_key() {
                index.titles.insert(key, note.id.clone());
            }
            index.add_links(note);
            index.add_tokens(note);
        }

        tracing::debug!(
            notes = index.note_count,
            titles = index.titles.len(),
            link_targets = index.backlinks.len(),
            tokens = index.doc_frequency.len(),
            "Rebuilt derived note index"
        );
        index
    }

    fn add_links(&mut self, note: &Note) {
        let mut note_links = BTreeMap::new();
        for link in extract_links(&note.content) {
            let key = normalize_title(&link.target);
            let bucket = self.backlinks.entry(key.clone()).or_default();
            if !bucket.iter().any(|entry| entry.source_id == note.id) {
                bucket.push(Backlink {
                    source_id: note.id.clone(),
                    source_title: note.title.clone(),
                });
            }
            note_links.insert(key, link.target);
        }
        if !note_links.is_empty() {
            self.links.insert(note.id.clone(), note_links);
        }
    }

    fn add_tokens(&mut self, note: &Note) {
        let tokens = similarity_tokens(&format!("{} {}", note.title, note.content));
        if tokens.is_empty() {
            return;
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for token in tokens {
            *counts.entry(token).or_default() += 1;
        }
        for token in counts.keys() {
            *self.doc_frequency.entry(token.clone()).or_default() += 1;
        }
        self.token_frequency.insert(note.id.clone(), counts);
    }

    /// Number of notes the index was built from.
    pub fn note_count(&self) -> usize {
        self.note_count
    }

    /// Id of the note owning `title` (trim + lowercase), if any.
    pub fn note_id_for_title(&self, title: &str) -> Option<&str> {
        let key = normalize_title(title);
        if key.is_empty() {
            return None;
        }
        self.titles.get(&key).map(String::as_str)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.note_id_for_title(title).is_some()
    }

    /// Position of a note in the collection the index was built from.
    pub fn position_of(&self, note_id: &str) -> Option<usize> {
        self.positions.get(note_id).copied()
    }

    /// Notes linking to the normalized `target`, in collection order.
    pub fn backlinks(&self, target: &str) -> &[Backlink] {
        self.backlinks
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn token_counts(&self, note_id: &str) -> Option<&BTreeMap<String, usize>> {
        self.token_frequency.get(note_id)
    }

    pub fn doc_frequency(&self, token: &str) -> usize {
        self.doc_frequency.get(token).copied().unwrap_or(0)
    }

    /// Normalized target -> label for each distinct link of a note.
    pub fn links_of(&self, note_id: &str) -> Option<&BTreeMap<String, String>> {
        self.links.get(note_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note::new(id, title, content, Utc::now())
    }

    #[test]
    fn test_build_collects_titles_and_backlinks() {
        let notes = vec![
            note("a", "Project Plan", "See [[Budget Notes]] and [[budget notes]] again."),
            note("b", "Budget Notes", "Linked from [[Project Plan]]."),
        ];
        let index = DerivedIndex::build(&notes);

        assert_eq!(index.note_count(), 2);
        assert_eq!(index.note_id_for_title("  BUDGET notes "), Some("b"));
        assert!(!index.contains_title("Missing"));
        assert!(!index.contains_title("   "));

        let backlinks = index.backlinks("budget notes");
        assert_eq!(
            backlinks,
            &[Backlink {
                source_id: "a".into(),
                source_title: "Project Plan".into()
            }]
        );
        assert!(index.backlinks("nothing").is_empty());

        let links = index.links_of("a").expect("links");
        assert_eq!(links.len(), 1);
        assert_eq!(index.position_of("b"), Some(1));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_later_note() {
        let notes = vec![note("first", "Inbox", ""), note("second", "inbox", "")];
        let index = DerivedIndex::build(&notes);
        assert_eq!(index.note_id_for_title("Inbox"), Some("second"));
    }

    #[test]
    fn test_token_and_document_frequency() {
        let notes = vec![
            note("a", "Garden", "tomato tomato seedlings"),
            note("b", "Kitchen", "tomato sauce"),
            note("c", "", "tiny"),
        ];
        let index = DerivedIndex::build(&notes);

        let counts = index.token_counts("a").expect("tokens");
        assert_eq!(counts.get("tomato"), Some(&2));
        assert_eq!(counts.get("garden"), Some(&1));
        assert_eq!(index.doc_frequency("tomato"), 2);
        assert_eq!(index.doc_frequency("sauce"), 1);
        assert_eq!(index.doc_frequency("absent"), 0);
        assert!(index.token_counts("c").is_none());
        assert!(index.links_of("c").is_none());
    }

    #[test]
    fn test_document_frequency_counts_common_non_stopwords() {
        let notes = vec![
            note("a", "", "we should plant"),
            note("b", "", "you should water"),
        ];
        let index = DerivedIndex::build(&notes);
        assert_eq!(index.doc_frequency("should"), 2);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let notes = vec![
            note("a", "Alpha", "[[Beta]] notes about gardens"),
            note("b", "Beta", "[[Alpha]] gardens again"),
        ];
        assert_eq!(DerivedIndex::build(&notes), DerivedIndex::build(&notes));
    }
}
