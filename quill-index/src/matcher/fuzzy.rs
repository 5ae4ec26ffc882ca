use crate::text::find;

const CONTIGUOUS_BASE: f64 = 140.0;
const SCATTERED_BASE: f64 = 80.0;
const GAP_PENALTY: f64 = 4.0;
const SCATTERED_FLOOR: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub score: f64,
    /// Matched char positions in the haystack, ascending.
    pub positions: Vec<usize>,
}

/// Subsequence match of `needle` in `haystack`, both already folded.
///
/// A contiguous occurrence is preferred and scores `140 - index`. Otherwise
/// the score starts at 80, loses 4 per skipped char between consecutive
/// matches and the index of the first match, and never drops below 1.
pub fn fuzzy_match(haystack: &[char], needle: &[char]) -> Option<FuzzyMatch> {
    if haystack.is_empty() || needle.is_empty() {
        return None;
    }

    let mut positions = Vec::with_capacity(needle.len());
    let mut next_from = 0;
    for ch in needle {
        let found = haystack[next_from..].iter().position(|c| c == ch)? + next_from;
        positions.push(found);
        next_from = found + 1;
    }

    if let Some(index) = find(haystack, needle) {
        return Some(FuzzyMatch {
            score: CONTIGUOUS_BASE - index as f64,
            positions: (index..index + needle.len()).collect(),
        });
    }

    let gaps: usize = positions
        .windows(2)
        .map(|pair| pair[1] - pair[0] - 1)
        .sum();
    let score = SCATTERED_BASE - gaps as f64 * GAP_PENALTY - positions[0] as f64;

    Some(FuzzyMatch {
        score: score.max(SCATTERED_FLOOR),
        positions,
    })
}
