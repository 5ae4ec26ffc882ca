//! Shared types for quill: the note model and configuration.

pub mod config;
pub mod note;

pub use config::{
    IndexSettings, IndexToolsSettings, LoggingSettings, Settings, SettingsError, load_dotenv,
};
pub use note::{
    Note, NoteDraft, NoteMetadata, UNTITLED, auto_tags_for, format_date_short, normalize_title,
};
