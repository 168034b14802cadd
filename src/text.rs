//! Char-safe string helpers shared by the index, the serialized cache and
//! the right-to-left wrappers. All lengths here are counted in `char`s, never
//! in bytes, so prefixes never split a multi-byte character.

/// Normalize a word for use as an index key. Matching is case-insensitive, so
/// this only lowercases; punctuation and whitespace are part of the key.
pub fn normalize_word(s: &str) -> String {
    s.to_lowercase()
}

/// Length of `s` in chars.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` chars of `s`, or all of `s` if it is shorter.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Reverse `s` char by char. Used to feed right-to-left words through the
/// left-to-right index.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Every prefix of `s` whose char length is within `min..=max`, shortest first.
pub fn prefixes(s: &str, min: usize, max: usize) -> impl Iterator<Item = &str> {
    s.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .zip(1usize..)
        .skip_while(move |&(_, n)| n < min)
        .take_while(move |&(_, n)| n <= max)
        .map(move |(end, _)| &s[..end])
}
