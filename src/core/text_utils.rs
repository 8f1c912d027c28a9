//! Text manipulation utilities for working with source code.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
/// This matches the `\w` class the scanner's patterns use for Eidos names.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the word start
/// and `end` is the character index after the last word character.
/// Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() {
        return None;
    }

    // Check if we're on a word character
    if !is_word_character(chars[position]) {
        return None;
    }

    // Find start of word
    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    // Find end of word
    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// The partially typed word at the end of `prefix` (may be empty).
///
/// # Example
/// ```
/// use eidos::core::text_utils::trailing_word;
///
/// assert_eq!(trailing_word("x = siz"), "siz");
/// assert_eq!(trailing_word("print("), "");
/// ```
pub fn trailing_word(prefix: &str) -> &str {
    let start = prefix
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_character(*c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(prefix.len());
    &prefix[start..]
}

/// Split a trailing `receiver.member` access off the end of `prefix`.
///
/// Returns the receiver name and the (possibly empty) partial member name.
/// Whitespace around the dot is not allowed.
///
/// # Example
/// ```
/// use eidos::core::text_utils::member_access_at_end;
///
/// assert_eq!(member_access_at_end("  ind.rel"), Some(("ind", "rel")));
/// assert_eq!(member_access_at_end("p1."), Some(("p1", "")));
/// assert_eq!(member_access_at_end("x = 1"), None);
/// ```
pub fn member_access_at_end(prefix: &str) -> Option<(&str, &str)> {
    let member = trailing_word(prefix);
    let before = prefix[..prefix.len() - member.len()].strip_suffix('.')?;
    let receiver = trailing_word(before);
    if receiver.is_empty() {
        return None;
    }
    Some((receiver, member))
}
