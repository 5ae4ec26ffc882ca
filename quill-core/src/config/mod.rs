//! Configuration management for quill.
//!
//! ## Settings (TOML File)
//! Located at `~/.config/quill/config.toml` (or `$QUILL_CONFIG_DIR/config.toml`):
//! ```toml
//! [logging]
//! level = "info"
//!
//! [index]
//! search_limit = 10
//! similar_top_k = 3
//! ```

pub mod index;
mod settings;

pub use index::IndexSettings;
pub use settings::{
    CONFIG_DIR_ENV, IndexToolsSettings, LoggingSettings, Settings, SettingsError,
};

impl Settings {
    /// Resolved index settings with defaults filled in.
    pub fn index_settings(&self) -> IndexSettings {
        IndexSettings::from(&self.index)
    }
}

/// Load variables from a `.env` file, if there is one.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
