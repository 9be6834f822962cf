//! Text helpers for announcement messages.

/// Appended to text that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// Weight Twitter assigns to any URL, regardless of its length.
pub const URL_WEIGHT: usize = 23;

/// Shortens `text` to `limit` characters, appending [`TRUNCATION_MARKER`].
///
/// Text of at most `limit` characters is returned unchanged. Characters are
/// counted as Unicode scalar values, so multi-byte text is never split.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Flattens user-supplied text onto a single line.
///
/// Control characters and whitespace runs become one space and the ends are
/// trimmed, so descriptions and commit subjects cannot break the layout.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Weight of a single character in Twitter's length counting.
///
/// Latin, Greek, Cyrillic and similar scripts plus common punctuation count
/// once; everything else (CJK, emoji, symbols such as `★`) counts twice.
#[must_use]
pub fn char_weight(c: char) -> usize {
    match u32::from(c) {
        0x0000..=0x10FF | 0x2000..=0x200D | 0x2010..=0x201F | 0x2032..=0x2037 => 1,
        _ => 2,
    }
}

fn text_weight(text: &str) -> usize {
    text.chars().map(char_weight).sum()
}

/// Length of `message` as counted by Twitter, with each occurrence of `url`
/// weighted as [`URL_WEIGHT`].
#[must_use]
pub fn weighted_length(message: &str, url: &str) -> usize {
    let total = text_weight(message);
    if url.is_empty() {
        return total;
    }
    let occurrences = message.matches(url).count();
    total - occurrences * text_weight(url) + occurrences * URL_WEIGHT
}
