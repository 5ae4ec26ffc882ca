//! Related-note ranking by shared vocabulary and shared links.

use quill_core::Note;

use crate::index::DerivedIndex;
use crate::models::SimilarNote;

const LINK_WEIGHT: f64 = 3.0;
const SHOWN_TOKENS: usize = 3;

/// Up to `top_k` notes most similar to `target`, best first.
///
/// Each token both notes contain adds `(a + b) * ln(1 + N / (1 + df))`, and
/// each shared link target adds a flat bonus. The pairwise score does not
/// depend on which of the two notes is the target.
pub fn similar_notes(
    notes: &[Note],
    index: &DerivedIndex,
    target: &Note,
    top_k: usize,
) -> Vec<SimilarNote> {
    if top_k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<SimilarNote> = notes
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .filter_map(|candidate| score_pair(index, target, candidate))
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    ranked
}

fn score_pair(index: &DerivedIndex, target: &Note, candidate: &Note) -> Option<SimilarNote> {
    let total = index.note_count() as f64;
    let mut score = 0.0;
    let mut shared_tokens = Vec::new();

    if let (Some(ours), Some(theirs)) = (
        index.token_counts(&target.id),
        index.token_counts(&candidate.id),
    ) {
        for (token, count) in ours {
            let Some(other) = theirs.get(token) else {
                continue;
            };
            let df = index.doc_frequency(token).max(1) as f64;
            let idf = (1.0 + total / (1.0 + df)).ln();
            score += (count + other) as f64 * idf;
            if shared_tokens.len() < SHOWN_TOKENS {
                shared_tokens.push(token.clone());
            }
        }
    }

    let mut shared_links = Vec::new();
    if let (Some(ours), Some(theirs)) = (
        index.links_of(&target.id),
        index.links_of(&candidate.id),
    ) {
        for key in ours.keys() {
            if let Some(label) = theirs.get(key) {
                shared_links.push(label.clone());
            }
        }
    }
    score += LINK_WEIGHT * shared_links.len() as f64;

    (score > 0.0).then(|| SimilarNote {
        note: candidate.clone(),
        score,
        shared_tokens,
        shared_links,
    })
}
