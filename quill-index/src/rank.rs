//! Recency weighting and weak-query detection.

use chrono::{DateTime, Utc};
use quill_core::{IndexSettings, Note};

use crate::tokenizer::is_stopword;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const WEAK_QUERY_MIN_LEN: usize = 2;
const WEAK_STOPWORD_MAX_LEN: usize = 5;

/// Boost for recently updated notes.
///
/// The full boost applies to notes updated now or in the future (clock skew),
/// decays linearly to zero over the recency window and is zero beyond it or
/// when the note has no usable timestamp.
pub fn recency_boost(note: &Note, now: DateTime<Utc>, settings: &IndexSettings) -> f64 {
    let Some(updated) = note.metadata.updated_at else {
        return 0.0;
    };
    let max_boost = settings.recency_max_boost;
    let window_days = f64::from(settings.recency_window_days);

    let age_days = (now - updated).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if age_days <= 0.0 {
        return max_boost;
    }
    if window_days <= 0.0 || age_days >= window_days {
        return 0.0;
    }
    (max_boost * (1.0 - age_days / window_days)).max(0.0)
}

/// A query too unspecific to search: shorter than two chars, or a short
/// stopword.
pub fn is_weak_query(query: &str) -> bool {
    let normalized = query.trim().to_lowercase();
    let len = normalized.chars().count();
    if len < WEAK_QUERY_MIN_LEN {
        return true;
    }
    is_stopword(&normalized) && len <= WEAK_STOPWORD_MAX_LEN
}
