mod index;
mod serialized;

use std::{collections::HashMap, sync::Arc};

use index::PrefixIndex;
use serialized::SerializedCache;

use crate::{models::Entry, text};

pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Average English word length + 1.
pub const DEFAULT_MAX_CACHING_LENGTH: usize = 6;

/// Engine tunables. Fixed for the life of a [`SuggestionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Shortest selector (in chars) that produces suggestions. At least 1.
    pub min_length: usize,

    /// Index depth. Longer selectors are answered by scanning the serialized
    /// bucket of their first `max_caching_length` chars.
    pub max_caching_length: usize,

    /// Byte budget for each serialized bucket. 0 = unbounded.
    pub cache_byte_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_caching_length: DEFAULT_MAX_CACHING_LENGTH,
            cache_byte_limit: 0,
        }
    }
}

/// In-memory prefix suggestion engine.
///
/// Words are indexed, case-insensitively, under every prefix of length
/// `min_length..=max_caching_length`. Selectors up to the index depth are
/// answered straight from the ranked bucket; longer selectors scan the
/// serialized form of the bucket for their truncated prefix.
///
/// There is no internal locking. Ingestion takes `&mut self` and queries take
/// `&self`; callers sharing an engine across threads wrap it themselves.
#[derive(Debug)]
pub struct SuggestionEngine {
    cfg: EngineConfig,
    index: PrefixIndex,
    cache: SerializedCache,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl SuggestionEngine {
    pub fn new(min_length: usize, max_caching_length: usize) -> Self {
        Self::with_config(EngineConfig {
            min_length,
            max_caching_length,
            ..EngineConfig::default()
        })
    }

    /// Create an engine. A `min_length` of 0 is treated as 1.
    pub fn with_config(cfg: EngineConfig) -> Self {
        let cfg = EngineConfig {
            min_length: cfg.min_length.max(1),
            ..cfg
        };

        Self {
            cfg,
            index: PrefixIndex::new(cfg.min_length, cfg.max_caching_length),
            cache: SerializedCache::new(cfg.cache_byte_limit),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Number of indexed prefixes.
    pub fn bucket_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    /// Add a single word. Pays the same full bucket rebuild as [`Self::add_words`].
    pub fn add_word(&mut self, entry: Entry) {
        self.add_words([entry]);
    }

    /// Add words to the index. Every bucket touched by the batch is merged and
    /// its serialized string regenerated from scratch, once per call, so large
    /// batches are much cheaper than repeated single additions.
    pub fn add_words<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut staged: HashMap<String, Vec<Arc<Entry>>> = HashMap::new();
        let mut n = 0;

        for entry in entries {
            let entry = Arc::new(entry);
            let name = text::normalize_word(entry.name());

            for key in self.index.keys(&name) {
                staged
                    .entry(key.to_string())
                    .or_default()
                    .push(Arc::clone(&entry));
            }
            n += 1;
        }

        let touched = staged.len();
        for (key, entries) in staged {
            let bucket = self.index.merge(&key, entries);
            self.cache.rebuild(&key, bucket);
        }

        log::debug!("added {} words, rebuilt {} prefix buckets", n, touched);
    }

    /// Suggest up to `limit` words for `selector`, best ranked first. Names are
    /// returned as stored (original casing), each at most once.
    pub fn suggest(&self, selector: &str, limit: usize) -> Vec<String> {
        let len = text::char_len(selector);
        if len < self.cfg.min_length || limit == 0 {
            return Vec::new();
        }

        if len > self.cfg.max_caching_length {
            let key =
                text::normalize_word(text::take_chars(selector, self.cfg.max_caching_length));
            return unique(self.cache.scan(&key, selector, limit));
        }

        match self.index.get(&text::normalize_word(selector)) {
            Some(bucket) => unique(bucket.iter().map(Entry::name).take(limit)),
            None => Vec::new(),
        }
    }

    /// [`Self::suggest`], joined with `separator`.
    pub fn suggest_joined(&self, selector: &str, separator: &str, limit: usize) -> String {
        self.suggest(selector, limit).join(separator)
    }

    /// Distinct characters that follow `selector` in `suggestions`, in order of
    /// first appearance and with the suggestion's own casing.
    pub fn suggest_next_letter<S: AsRef<str>>(
        &self,
        selector: &str,
        suggestions: &[S],
    ) -> Vec<String> {
        next_letters(selector, suggestions)
    }

    /// [`Self::suggest_next_letter`] over a `separator`-joined list, rejoined
    /// with the same separator.
    pub fn suggest_next_letter_joined(
        &self,
        selector: &str,
        suggestions: &str,
        separator: &str,
    ) -> String {
        let words: Vec<&str> = if suggestions.is_empty() {
            Vec::new()
        } else if separator.is_empty() {
            vec![suggestions]
        } else {
            suggestions.split(separator).collect()
        };

        next_letters(selector, &words).join(separator)
    }

    /// Suggest for a right-to-left selector against words added with
    /// [`Entry::rtl`]. Results are returned in their natural direction.
    pub fn suggest_rtl(&self, selector: &str, limit: usize) -> Vec<String> {
        self.suggest(&text::reverse(selector), limit)
            .iter()
            .map(|w| text::reverse(w))
            .collect()
    }

    pub fn suggest_rtl_joined(&self, selector: &str, separator: &str, limit: usize) -> String {
        self.suggest_rtl(selector, limit).join(separator)
    }
}

fn next_letters<S: AsRef<str>>(selector: &str, suggestions: &[S]) -> Vec<String> {
    let pos = text::char_len(selector);
    let mut out: Vec<String> = Vec::new();

    for word in suggestions {
        if let Some(c) = word.as_ref().chars().nth(pos) {
            let letter = c.to_string();
            if !out.contains(&letter) {
                out.push(letter);
            }
        }
    }

    out
}

/// Collect names, dropping repeats but keeping first-seen order.
fn unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_min_length_is_clamped() {
        let e = SuggestionEngine::new(0, 6);
        assert_eq!(e.config().min_length, 1);
        assert!(e.suggest("", 10).is_empty());
    }

    #[test]
    fn test_bucket_count() {
        let mut e = SuggestionEngine::default();
        assert!(e.is_empty());

        e.add_word(Entry::new("success", 10));
        assert_eq!(e.bucket_count(), 6);

        // Shares every prefix with "success".
        e.add_word(Entry::new("Successor", 1));
        assert_eq!(e.bucket_count(), 6);

        e.add_word(Entry::new("go", 1));
        assert_eq!(e.bucket_count(), 8);
    }

    #[test]
    fn test_serialized_matches_bucket() {
        let mut e = SuggestionEngine::default();
        e.add_words([Entry::new("success", 10), Entry::new("succubus", 9)]);
        e.add_word(Entry::new("Succinct", 50));

        assert_eq!(e.cache.get("succ"), Some("|Succinct|success|succubus|"));
        assert_eq!(e.cache.get("succu"), Some("|succubus|"));
        assert_eq!(e.cache.get("succub"), Some("|succubus|"));
        assert_eq!(e.cache.get("succubu"), None);
    }

    #[test]
    fn test_limit_zero() {
        let mut e = SuggestionEngine::default();
        e.add_word(Entry::new("success", 10));
        assert!(e.suggest("succ", 0).is_empty());
        assert!(e.suggest("success", 0).is_empty());
    }

    #[test]
    fn test_next_letters() {
        assert_eq!(
            next_letters("succ", &["success", "succubus", "Succinct"]),
            vec!["e", "u", "i"]
        );
        assert_eq!(next_letters("abc", &["abc", "abcd"]), vec!["d"]);
        assert!(next_letters::<&str>("abc", &[]).is_empty());
        assert_eq!(next_letters("", &["Ab", "ab"]), vec!["A", "a"]);
    }

    #[test]
    fn test_unique() {
        assert_eq!(unique(["a", "b", "a", "A"]), vec!["a", "b", "A"]);
    }
}
