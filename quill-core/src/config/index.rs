//! Index configuration types.
//!
//! These types define the resolved (non-optional) settings used by
//! `quill-index`. They are created from the user-facing
//! `IndexToolsSettings` TOML struct via `From`.

use serde::{Deserialize, Serialize};

use super::settings::IndexToolsSettings;

/// Resolved index and ranking settings (all values filled with defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_recent_suggestion_limit")]
    pub recent_suggestion_limit: usize,
    #[serde(default = "default_recent_notes_limit")]
    pub recent_notes_limit: usize,
    #[serde(default = "default_similar_top_k")]
    pub similar_top_k: usize,
    /// Characters kept on each side of the matched span in content snippets.
    #[serde(default = "default_snippet_radius")]
    pub snippet_radius: usize,
    #[serde(default = "default_recency_max_boost")]
    pub recency_max_boost: f64,
    #[serde(default = "default_recency_window_days")]
    pub recency_window_days: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            suggestion_limit: default_suggestion_limit(),
            recent_suggestion_limit: default_recent_suggestion_limit(),
            recent_notes_limit: default_recent_notes_limit(),
            similar_top_k: default_similar_top_k(),
            snippet_radius: default_snippet_radius(),
            recency_max_boost: default_recency_max_boost(),
            recency_window_days: default_recency_window_days(),
        }
    }
}

fn default_search_limit() -> usize {
    10
}

fn default_suggestion_limit() -> usize {
    6
}

fn default_recent_suggestion_limit() -> usize {
    5
}

fn default_recent_notes_limit() -> usize {
    6
}

fn default_similar_top_k() -> usize {
    3
}

fn default_snippet_radius() -> usize {
    48
}

fn default_recency_max_boost() -> f64 {
    35.0
}

fn default_recency_window_days() -> u32 {
    90
}

impl From<&IndexToolsSettings> for IndexSettings {
    fn from(value: &IndexToolsSettings) -> Self {
        let mut settings = IndexSettings::default();
        if let Some(limit) = value.search_limit {
            settings.search_limit = limit;
        }
        if let Some(limit) = value.suggestion_limit {
            settings.suggestion_limit = limit;
        }
        if let Some(limit) = value.recent_suggestion_limit {
            settings.recent_suggestion_limit = limit;
        }
        if let Some(limit) = value.recent_notes_limit {
            settings.recent_notes_limit = limit;
        }
        if let Some(top_k) = value.similar_top_k {
            settings.similar_top_k = top_k;
        }
        if let Some(radius) = value.snippet_radius {
            settings.snippet_radius = radius;
        }
        if let Some(boost) = value.recency_max_boost {
            settings.recency_max_boost = boost.max(0.0);
        }
        if let Some(days) = value.recency_window_days {
            settings.recency_window_days = days;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let tools = IndexToolsSettings {
            search_limit: Some(3),
            recency_max_boost: Some(-4.0),
            ..Default::default()
        };

        let resolved = IndexSettings::from(&tools);

        assert_eq!(resolved.search_limit, 3);
        assert_eq!(resolved.recency_max_boost, 0.0);
        assert_eq!(resolved.suggestion_limit, 6);
        assert_eq!(resolved.snippet_radius, 48);
        assert_eq!(resolved.recency_window_days, 90);
    }
}
