//! Character-level helpers shared by the matchers.
//!
//! All offsets are char offsets. Text is lowercased one char at a time so a
//! folded string has exactly as many chars as the original and highlight
//! ranges computed on it line up with the text a caller displays.

pub(crate) fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Lowercase `text` char by char, preserving its length in chars.
pub fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// True when `index` is 0 or the char before it is not alphanumeric.
pub fn is_word_boundary(text: &[char], index: usize) -> bool {
    index == 0 || text.get(index - 1).is_none_or(|c| !is_word_char(*c))
}

/// First occurrence of `needle` in `haystack` at or after `from`.
pub fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    (from..=last_start).find(|&start| haystack[start..start + needle.len()] == *needle)
}

pub fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    find_from(haystack, needle, 0)
}

/// First occurrence of `needle` that starts on a word boundary.
pub fn find_word_boundary(haystack: &[char], needle: &[char]) -> Option<usize> {
    let mut from = 0;
    while let Some(index) = find_from(haystack, needle, from) {
        if is_word_boundary(haystack, index) {
            return Some(index);
        }
        from = index + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_preserves_char_count() {
        let original = "Ärger İstanbul";
        assert_eq!(fold(original).len(), original.chars().count());
        assert_eq!(fold("ABC"), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_find_and_boundary() {
        let hay = fold("reprint print");
        let needle = fold("print");
        assert_eq!(find(&hay, &needle), Some(2));
        assert_eq!(find_word_boundary(&hay, &needle), Some(8));
        assert_eq!(find_word_boundary(&hay, &fold("zzz")), None);
        assert_eq!(find(&hay, &[]), None);
    }

    #[test]
    fn test_word_boundary_positions() {
        let hay = fold("a-b c");
        assert!(is_word_boundary(&hay, 0));
        assert!(!is_word_boundary(&hay, 1));
        assert!(is_word_boundary(&hay, 2));
        assert!(is_word_boundary(&hay, 4));
    }
}
