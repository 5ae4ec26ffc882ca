//! Settings configuration loaded from TOML files.
//!
//! This module handles the configuration stored in TOML format in the XDG
//! config directory (~/.config/quill/config.toml).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "QUILL_CONFIG_DIR";

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# quill configuration file
# Located at: ~/.config/quill/config.toml
# Override the directory with QUILL_CONFIG_DIR.

[logging]
level = "info"

[index]
# search_limit = 10
# suggestion_limit = 6
# recent_suggestion_limit = 5
# recent_notes_limit = 6
# similar_top_k = 3
# snippet_radius = 48
# recency_max_boost = 35.0
# recency_window_days = 90
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Index and ranking overrides
    #[serde(default)]
    pub index: IndexToolsSettings,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// User-facing index overrides. Unset values fall back to the defaults in
/// [`IndexSettings`](super::IndexSettings).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndexToolsSettings {
    /// Maximum number of search results
    pub search_limit: Option<usize>,

    /// Maximum number of note suggestions while typing a `[[` link
    pub suggestion_limit: Option<usize>,

    /// Recent notes offered for an empty `[[` query
    pub recent_suggestion_limit: Option<usize>,

    /// Default length of the recent notes list
    pub recent_notes_limit: Option<usize>,

    /// Number of similar notes returned
    pub similar_top_k: Option<usize>,

    /// Characters kept on each side of a snippet match
    pub snippet_radius: Option<usize>,

    /// Boost granted to a note updated just now
    pub recency_max_boost: Option<f64>,

    /// Age in days after which recency no longer boosts
    pub recency_window_days: Option<u32>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load settings from a specific file, creating it with defaults when missing.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::info!("Creating default configuration at {:?}", path);
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Serialize settings to TOML content.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/quill/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var(CONFIG_DIR_ENV) {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("quill");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Save settings to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.logging.level, "info");
        assert!(settings.index.search_limit.is_none());
        assert!(settings.index.recency_max_boost.is_none());
    }

    #[test]
    fn test_default_config_parses() {
        let settings = Settings::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(settings.logging.level, "info");
        assert!(settings.index.similar_top_k.is_none());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = r#"
[index]
search_limit = 25
recency_max_boost = 10.5
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.index.search_limit, Some(25));
        assert_eq!(settings.index.recency_max_boost, Some(10.5));
        assert!(settings.index.snippet_radius.is_none());
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = Settings::from_toml("[index\nsearch_limit =").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.logging.level = "debug".to_string();
        settings.index.similar_top_k = Some(5);

        settings.save_to_path(&path).expect("save failed");
        let loaded = Settings::load_from_path(&path).expect("load failed");

        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.index.similar_top_k, Some(5));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = Settings::load_from_path(&path).expect("load failed");

        assert!(path.exists());
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_config_path_uses_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let value = dir.path().to_string_lossy().to_string();

        // SAFETY: test-scoped env mutation.
        unsafe { std::env::set_var(CONFIG_DIR_ENV, &value) };
        let path = Settings::config_path().unwrap();
        // SAFETY: test-scoped env mutation cleanup.
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };

        assert_eq!(path, dir.path().join("config.toml"));
    }
}
