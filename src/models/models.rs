use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::Serialize;

use crate::text;

/// Delimiter between names in the serialized cache. Never exposed to callers,
/// whose joined-string APIs take their own separator.
pub(crate) const SEPARATOR: char = '|';

/// What an occurrence of [`SEPARATOR`] in a name is replaced with. This is the
/// separator itself, so sanitizing is an identity: a name containing `|` is
/// stored verbatim and can be split apart by fallback scans.
const SEPARATOR_TOKEN: &str = "|";

/// A vocabulary word and its popularity rank.
///
/// Two entries are equal when their ranks match and their names match
/// case-insensitively. Ranking order (see [`Entry::ranking`]) puts higher
/// ranks first and breaks ties by the case-sensitive name.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    rank: i32,
}

impl Entry {
    pub fn new(name: impl Into<String>, rank: i32) -> Self {
        let name = name.into();
        let name = if name.contains(SEPARATOR) {
            name.replace(SEPARATOR, SEPARATOR_TOKEN)
        } else {
            name
        };

        Self { name, rank }
    }

    /// Build an entry for a right-to-left word. The name is reversed so the
    /// word's trailing (visually leading) characters become indexable prefixes.
    pub fn rtl(name: &str, rank: i32) -> Self {
        Self::new(text::reverse(name), rank)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    /// Ranking order: `rank` descending, then `name` ascending by codepoint.
    pub fn ranking(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.name.cmp(&other.name))
    }

    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.name.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.folded().eq(other.folded())
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded() {
            c.hash(state);
        }
        self.rank.hash(state);
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Answer for a single selector: the ranked words and the characters that
/// can follow the selector in them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub selector: String,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_letters: Vec<String>,
}

#[cfg(test)]
mod tests {
    use std::collections::{hash_map::DefaultHasher, HashSet};

    use super::*;

    fn hash_of(e: &Entry) -> u64 {
        let mut h = DefaultHasher::new();
        e.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_accessors() {
        let e = Entry::new("success", 10);
        assert_eq!(e.name(), "success");
        assert_eq!(e.rank(), 10);
        assert_eq!(e.to_string(), "success");
    }

    #[test]
    fn test_separator_sanitize_is_identity() {
        let e = Entry::new("either|or", 1);
        assert_eq!(e.name(), "either|or");
    }

    #[test]
    fn test_equality() {
        let a = Entry::new("success", 10);
        let b = Entry::new("success", 12);
        let c = Entry::new("success", 10);
        let d = Entry::new("Success", 10);

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(a, d);
        assert_eq!(hash_of(&a), hash_of(&d));

        let set: HashSet<Entry> = [a, b, c, d].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ranking() {
        let base = Entry::new("success", 10);

        assert_eq!(base.ranking(&Entry::new("success", 12)), Ordering::Greater);
        assert_eq!(base.ranking(&Entry::new("success", 10)), Ordering::Equal);
        assert_eq!(base.ranking(&Entry::new("success", 1)), Ordering::Less);
        assert_eq!(base.ranking(&Entry::new("higher", 120)), Ordering::Greater);

        // Equal ranks: ascending codepoint order on the name.
        assert_eq!(base.ranking(&Entry::new("succubus", 10)), Ordering::Less);
        assert_eq!(
            Entry::new("success with whitespaces", 1)
                .ranking(&Entry::new("success-very-boring", 1)),
            Ordering::Less
        );
    }

    #[test]
    fn test_rtl() {
        assert_eq!(Entry::rtl("abc", 0).name(), "cba");
        assert_eq!(Entry::rtl("نجاح", 10).name(), "حاجن");
    }

    #[test]
    fn test_suggestions_json_skips_empty_letters() {
        let s = Suggestions {
            selector: "ح".to_string(),
            words: vec!["نجح".to_string()],
            next_letters: Vec::new(),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"selector":"ح","words":["نجح"]}"#);
    }
}
