//! Unicode helpers for one-line message previews.
//!
//! Message bodies are user text: emoji with modifiers, combining marks and
//! CJK are common, so truncation works on grapheme clusters rather than
//! bytes or chars.

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to truncated previews.
pub const ELLIPSIS: char = '…';

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use chanlog::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// Returns at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let end_byte = s
        .grapheme_indices(true)
        .nth(max_graphemes)
        .map_or(s.len(), |(offset, _)| offset);
    &s[..end_byte]
}

/// Renders `s` on a single line of at most `max_graphemes` clusters.
///
/// Runs of whitespace (including newlines) collapse to one space. When the
/// text is cut, the last cluster is replaced by [`ELLIPSIS`].
///
/// # Examples
///
/// ```
/// use chanlog::io::preview;
///
/// assert_eq!(preview("hello\n  world", 20), "hello world");
/// assert_eq!(preview("hello world", 6), "hello…");
/// ```
#[must_use]
pub fn preview(s: &str, max_graphemes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if max_graphemes == 0 {
        return String::new();
    }
    if grapheme_count(&flat) <= max_graphemes {
        return flat;
    }
    let mut out = truncate_graphemes(&flat, max_graphemes - 1).to_string();
    out.push(ELLIPSIS);
    out
}
