#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("unknown note: {0}")]
    UnknownNote(String),
    #[error("note id must not be empty")]
    EmptyNoteId,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings error: {0}")]
    Settings(#[from] quill_core::SettingsError),
}

pub type IndexResult<T> = Result<T, IndexError>;
