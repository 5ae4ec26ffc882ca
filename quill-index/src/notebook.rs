use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quill_core::{IndexSettings, Note, NoteDraft, auto_tags_for};

use crate::cache::IndexCache;
use crate::errors::{IndexError, IndexResult};
use crate::graph;
use crate::index::DerivedIndex;
use crate::listing;
use crate::models::{
    Backlink, HomeEntry, HomeQuery, LinkSuggestion, OutgoingLink, SearchHit, SearchOptions,
    SimilarNote,
};
use crate::parser::LinkTrigger;
use crate::search::search_notes;
use crate::similar::similar_notes;
use crate::suggest::build_link_suggestions;

/// Owns the note collection and keeps the derived index in step with it.
///
/// Every mutation takes `&mut self` and invalidates the cache; queries take
/// `&self` and work on one immutable index generation.
#[derive(Debug, Default)]
pub struct Notebook {
    notes: Vec<Note>,
    cache: IndexCache,
    settings: IndexSettings,
}

impl Notebook {
    pub fn new(settings: IndexSettings) -> Self {
        Self {
            notes: Vec::new(),
            cache: IndexCache::new(),
            settings,
        }
    }

    pub fn with_notes(notes: Vec<Note>, settings: IndexSettings) -> Self {
        Self {
            notes,
            cache: IndexCache::new(),
            settings,
        }
    }

    /// Load a JSON array of notes, e.g. an export of the note store.
    pub fn load_json(path: &Path, settings: IndexSettings) -> IndexResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let notes: Vec<Note> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), notes = notes.len(), "Loaded notes");
        Ok(Self::with_notes(notes, settings))
    }

    /// Like [`Notebook::load_json`], taking index settings from a TOML settings file.
    pub fn load_json_with_settings_file(notes: &Path, settings: &Path) -> IndexResult<Self> {
        let settings = quill_core::Settings::load_from_path(settings)?.index_settings();
        Self::load_json(notes, settings)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// The current derived index, rebuilt first if a mutation discarded it.
    pub fn index(&self) -> Arc<DerivedIndex> {
        self.cache.get(&self.notes)
    }

    /// Discard the derived index. Mutations through this type already do.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// How many times the derived index has been rebuilt.
    pub fn index_builds(&self) -> u64 {
        self.cache.build_count()
    }

    pub fn replace_all(&mut self, notes: Vec<Note>) {
        tracing::debug!(notes = notes.len(), "Replaced note collection");
        self.notes = notes;
        self.cache.invalidate();
    }

    pub fn upsert(&mut self, draft: NoteDraft) -> IndexResult<Note> {
        self.upsert_at(draft, Utc::now())
    }

    /// Update the note with the draft's id, or create a new note at the front
    /// of the collection when there is no such note.
    pub fn upsert_at(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> IndexResult<Note> {
        if draft.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(IndexError::EmptyNoteId);
        }

        let existing = draft
            .id
            .as_deref()
            .and_then(|id| self.notes.iter().position(|note| note.id == id));

        let saved = match existing {
            Some(position) => {
                let note = &mut self.notes[position];
                note.title = draft.title;
                note.content = draft.content;
                note.metadata.updated_at = Some(now);
                note.metadata.auto_tags = auto_tags_for(now);
                if let Some(pinned) = draft.pinned {
                    note.metadata.pinned = pinned;
                }
                tracing::debug!(id = %note.id, "Updated note");
                note.clone()
            }
            None => {
                let id = draft.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                let mut note = Note::new(id, draft.title, draft.content, now);
                note.metadata.pinned = draft.pinned.unwrap_or(false);
                tracing::debug!(id = %note.id, "Created note");
                self.notes.insert(0, note.clone());
                note
            }
        };

        self.cache.invalidate();
        Ok(saved)
    }

    pub fn delete(&mut self, id: &str) -> IndexResult<Note> {
        let position = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| IndexError::UnknownNote(id.to_string()))?;
        let removed = self.notes.remove(position);
        self.cache.invalidate();
        tracing::debug!(id, "Deleted note");
        Ok(removed)
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> IndexResult<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| IndexError::UnknownNote(id.to_string()))?;
        note.metadata.pinned = pinned;
        self.cache.invalidate();
        tracing::debug!(id, pinned, "Set note pin");
        Ok(())
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        search_notes(&self.notes, query, options, &self.settings)
    }

    pub fn suggest_links(&self, trigger: &LinkTrigger) -> Vec<LinkSuggestion> {
        self.suggest_links_at(trigger, Utc::now())
    }

    /// Link suggestions with recency measured from `now`.
    pub fn suggest_links_at(
        &self,
        trigger: &LinkTrigger,
        now: DateTime<Utc>,
    ) -> Vec<LinkSuggestion> {
        build_link_suggestions(&self.notes, trigger, now, &self.settings)
    }

    pub fn similar(&self, note: &Note, top_k: usize) -> Vec<SimilarNote> {
        similar_notes(&self.notes, &self.index(), note, top_k)
    }

    /// [`similar`](Self::similar) with the configured `similar_top_k`.
    pub fn similar_default(&self, note: &Note) -> Vec<SimilarNote> {
        self.similar(note, self.settings.similar_top_k)
    }

    pub fn backlinks_for(&self, note: &Note) -> Vec<Backlink> {
        graph::backlinks_for(&self.index(), note)
    }

    pub fn outgoing_links(&self, note: &Note) -> Vec<OutgoingLink> {
        graph::outgoing_links(&self.index(), note)
    }

    /// Whether a `[[title]]` link would resolve to a note.
    pub fn note_exists_for_title(&self, title: &str) -> bool {
        self.index().contains_title(title)
    }

    pub fn resolve_title(&self, title: &str) -> Option<&Note> {
        let index = self.index();
        let id = index.note_id_for_title(title)?;
        index
            .position_of(id)
            .and_then(|position| self.notes.get(position))
    }

    pub fn recent_notes(&self, limit: Option<usize>) -> Vec<&Note> {
        listing::recent_notes(&self.notes, limit.unwrap_or(self.settings.recent_notes_limit))
    }

    pub fn home_listing(&self, query: HomeQuery) -> Vec<HomeEntry> {
        listing::home_listing(&self.notes, query)
    }
}
