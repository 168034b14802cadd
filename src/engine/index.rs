use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{models::Entry, text};

/// Entries sharing a prefix, unique under [`Entry`] equality and kept sorted
/// by [`Entry::ranking`].
#[derive(Debug, Default, Clone)]
pub(crate) struct Bucket {
    entries: Vec<Arc<Entry>>,
    seen: HashSet<Arc<Entry>>,
}

impl Bucket {
    /// Insert an entry at its ranked position. Returns false if an equal entry
    /// is already present, in which case the stored one (and its casing) stays.
    #[cfg(test)]
    pub fn insert(&mut self, entry: Arc<Entry>) -> bool {
        if !self.seen.insert(Arc::clone(&entry)) {
            return false;
        }

        let pos = match self.entries.binary_search_by(|e| e.ranking(&entry)) {
            Ok(p) | Err(p) => p,
        };
        self.entries.insert(pos, entry);
        true
    }

    /// Add a batch of entries, skipping ones equal to a stored or earlier
    /// entry, then re-sort once. Returns the number added.
    pub fn extend<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Arc<Entry>>,
    {
        let before = self.entries.len();
        for entry in entries {
            if self.seen.insert(Arc::clone(&entry)) {
                self.entries.push(entry);
            }
        }

        let added = self.entries.len() - before;
        if added > 0 {
            // Stored entries are one sorted run, so this is a run merge.
            self.entries.sort_by(|a, b| a.ranking(b));
        }
        added
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().map(|e| &**e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Lowercased prefix -> ranked bucket, for prefix lengths in
/// `min_length..=max_length`.
#[derive(Debug)]
pub(crate) struct PrefixIndex {
    buckets: HashMap<String, Bucket>,
    min_length: usize,
    max_length: usize,
}

impl PrefixIndex {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            min_length,
            max_length,
        }
    }

    /// Keys an already-normalized name is indexed under.
    pub fn keys<'a>(&self, normalized: &'a str) -> impl Iterator<Item = &'a str> {
        text::prefixes(normalized, self.min_length, self.max_length)
    }

    /// Merge staged entries into the bucket for `key` and return the bucket.
    pub fn merge(&mut self, key: &str, staged: Vec<Arc<Entry>>) -> &Bucket {
        let bucket = self.buckets.entry(key.to_string()).or_default();
        bucket.extend(staged);
        bucket
    }

    pub fn get(&self, key: &str) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}
