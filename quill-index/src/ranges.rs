//! Highlight ranges, snippet windows and highlight segments.
//!
//! Ranges are half-open char offsets into the text they were computed for.

use serde::{Deserialize, Serialize};

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Range covering `len` chars from `start`.
    pub fn span(start: usize, len: usize) -> Self {
        Self::new(start, start + len)
    }

    pub fn shifted(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Sort by start and merge overlapping or touching ranges.
///
/// The output is sorted, pairwise disjoint and covers exactly the positions
/// the input covers. Empty ranges are dropped.
pub fn compress_ranges<I>(ranges: I) -> Vec<HighlightRange>
where
    I: IntoIterator<Item = HighlightRange>,
{
    let mut sorted: Vec<HighlightRange> = ranges.into_iter().filter(|r| !r.is_empty()).collect();
    sorted.sort_by_key(|range| range.start);

    let mut merged: Vec<HighlightRange> = Vec::with_capacity(sorted.len());
    for next in sorted {
        match merged.last_mut() {
            Some(current) if next.start <= current.end => {
                current.end = current.end.max(next.end);
            }
            _ => merged.push(next),
        }
    }
    merged
}

/// Single-char ranges for each position, compressed.
pub fn ranges_from_positions(positions: &[usize]) -> Vec<HighlightRange> {
    compress_ranges(positions.iter().map(|&pos| HighlightRange::span(pos, 1)))
}

/// A window of text around matched positions, with ranges relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    pub ranges: Vec<HighlightRange>,
}

/// Cut a window of `radius` chars on each side of the matched span.
///
/// An ellipsis marks each clipped side and the returned ranges account for
/// it. Without positions the first `2 * radius` chars are returned.
pub fn extract_snippet(text: &str, positions: &[usize], radius: usize) -> Snippet {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Snippet {
            text: String::new(),
            ranges: Vec::new(),
        };
    }

    let (Some(&first), Some(&last)) = (positions.iter().min(), positions.iter().max()) else {
        let end = chars.len().min(radius.saturating_mul(2));
        return Snippet {
            text: chars[..end].iter().collect(),
            ranges: Vec::new(),
        };
    };

    let start = first.saturating_sub(radius).min(chars.len());
    let end = chars
        .len()
        .min(last.saturating_add(radius).saturating_add(1))
        .max(start);
    let prefix_len = usize::from(start > 0);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push(ELLIPSIS);
    }

    let ranges = compress_ranges(
        positions
            .iter()
            .filter(|&&pos| pos >= start && pos < end)
            .map(|&pos| HighlightRange::span(pos - start + prefix_len, 1)),
    );

    Snippet {
        text: snippet,
        ranges,
    }
}

/// A run of snippet text, either plain or highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    pub text: String,
    pub matched: bool,
}

/// Split `text` into plain and matched runs. Ranges are compressed and
/// clamped to the text first.
pub fn highlight_segments(text: &str, ranges: &[HighlightRange]) -> Vec<HighlightSegment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for range in compress_ranges(ranges.iter().copied()) {
        let start = range.start.min(chars.len());
        let end = range.end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > cursor {
            segments.push(HighlightSegment {
                text: chars[cursor..start].iter().collect(),
                matched: false,
            });
        }
        segments.push(HighlightSegment {
            text: chars[start..end].iter().collect(),
            matched: true,
        });
        cursor = end;
    }

    if cursor < chars.len() {
        segments.push(HighlightSegment {
            text: chars[cursor..].iter().collect(),
            matched: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(ranges: &[HighlightRange]) -> Vec<usize> {
        let mut positions: Vec<usize> = ranges.iter().flat_map(|r| r.start..r.end).collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    #[test]
    fn test_compress_merges_overlapping_and_adjacent() {
        let input = vec![
            HighlightRange::new(8, 10),
            HighlightRange::new(0, 2),
            HighlightRange::new(1, 4),
            HighlightRange::new(4, 5),
            HighlightRange::new(6, 6),
        ];
        let merged = compress_ranges(input.clone());
        assert_eq!(
            merged,
            vec![HighlightRange::new(0, 5), HighlightRange::new(8, 10)]
        );
        assert_eq!(covered(&merged), covered(&input));
    }

    #[test]
    fn test_compress_output_is_sorted_and_disjoint() {
        let input: Vec<HighlightRange> = (0..40)
            .map(|i| HighlightRange::new((i * 7) % 23, (i * 7) % 23 + (i % 4)))
            .collect();
        let merged = compress_ranges(input.clone());
        for pair in merged.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
        assert_eq!(covered(&merged), covered(&input));
    }

    #[test]
    fn test_snippet_without_clipping() {
        let snippet = extract_snippet("short text", &[6, 7, 8, 9], 48);
        assert_eq!(snippet.text, "short text");
        assert_eq!(snippet.ranges, vec![HighlightRange::new(6, 10)]);
    }

    #[test]
    fn test_snippet_clips_both_sides_with_ellipsis() {
        let text = format!("{}needle{}", "a".repeat(60), "b".repeat(60));
        let positions: Vec<usize> = (60..66).collect();
        let snippet = extract_snippet(&text, &positions, 10);

        assert!(snippet.text.starts_with('…'));
        assert!(snippet.text.ends_with('…'));
        assert_eq!(snippet.text.chars().count(), 1 + 10 + 6 + 10 + 1);
        assert_eq!(snippet.ranges, vec![HighlightRange::new(11, 17)]);

        let segments = highlight_segments(&snippet.text, &snippet.ranges);
        assert_eq!(segments[1].text, "needle");
        assert!(segments[1].matched);
    }

    #[test]
    fn test_snippet_without_positions_takes_prefix() {
        let snippet = extract_snippet("abcdefghij", &[], 3);
        assert_eq!(snippet.text, "abcdef");
        assert!(snippet.ranges.is_empty());
    }

    #[test]
    fn test_snippet_huge_radius_keeps_whole_text() {
        let snippet = extract_snippet("abc", &[1], usize::MAX);
        assert_eq!(snippet.text, "abc");
        assert_eq!(snippet.ranges, vec![HighlightRange::new(1, 2)]);

        assert_eq!(extract_snippet("abc", &[], usize::MAX).text, "abc");
    }

    #[test]
    fn test_highlight_segments_clamps() {
        let segments = highlight_segments("abc", &[HighlightRange::new(1, 10)]);
        assert_eq!(
            segments,
            vec![
                HighlightSegment {
                    text: "a".into(),
                    matched: false
                },
                HighlightSegment {
                    text: "bc".into(),
                    matched: true
                },
            ]
        );
    }
}
