//! Note indexing, matching and ranking for quill.

pub mod cache;
pub mod errors;
pub mod graph;
pub mod index;
pub mod listing;
pub mod matcher;
pub mod models;
pub mod notebook;
pub mod parser;
pub mod ranges;
pub mod rank;
pub mod search;
pub mod similar;
pub mod suggest;
pub mod text;
pub mod tokenizer;

pub use quill_core::{IndexSettings, Note, NoteDraft, NoteMetadata};
pub use errors::{IndexError, IndexResult};
pub use index::DerivedIndex;
pub use models::{
    Backlink, HomeEntry, HomeQuery, HomeSort, LinkSuggestion, OutgoingLink, SearchHit,
    SearchOptions, SimilarNote, SuggestionKind,
};
pub use notebook::Notebook;
pub use parser::{LinkTrigger, WikiLink};
pub use ranges::{HighlightRange, HighlightSegment, highlight_segments};
pub use rank::{is_weak_query, recency_boost};
