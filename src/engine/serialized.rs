use std::collections::HashMap;

use super::index::Bucket;
use crate::models::{Entry, SEPARATOR};

/// Flattened `|name|name|...|` form of each index bucket, scanned for
/// selectors longer than the index depth.
#[derive(Debug)]
pub(crate) struct SerializedCache {
    strings: HashMap<String, String>,

    /// Stop appending once the string is longer than this many bytes. 0 = no limit.
    byte_limit: usize,
}

impl SerializedCache {
    pub fn new(byte_limit: usize) -> Self {
        Self {
            strings: HashMap::new(),
            byte_limit,
        }
    }

    /// Regenerate the string for `key` from the whole bucket.
    pub fn rebuild(&mut self, key: &str, bucket: &Bucket) {
        let mut out = String::with_capacity(bucket.len() * 8 + 1);
        out.push(SEPARATOR);

        for name in bucket.iter().map(Entry::name) {
            out.push_str(name);
            out.push(SEPARATOR);

            // The entry that crosses the limit is kept.
            if self.byte_limit > 0 && out.len() > self.byte_limit {
                break;
            }
        }

        self.strings.insert(key.to_string(), out);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Scan the string stored under `key` for names that start with `selector`
    /// (case-insensitively) and continue with at least one letter, `-`, `_` or
    /// space up to the next separator. Returns up to `limit` names in stored
    /// (rank) order.
    pub fn scan(&self, key: &str, selector: &str, limit: usize) -> Vec<&str> {
        let Some(serialized) = self.get(key) else {
            return Vec::new();
        };

        let folded: Vec<char> = selector.chars().flat_map(char::to_lowercase).collect();

        serialized
            .split(SEPARATOR)
            .filter(|name| extends(name, &folded))
            .take(limit)
            .collect()
    }
}

/// Whether `name` is the case-folded selector followed by one or more name
/// characters (letters, `-`, `_`, space).
fn extends(name: &str, folded: &[char]) -> bool {
    let mut want = folded.iter();
    let mut tail = None;

    for (i, c) in name.char_indices() {
        if want.len() == 0 {
            tail = Some(i);
            break;
        }
        for lc in c.to_lowercase() {
            if want.next() != Some(&lc) {
                return false;
            }
        }
    }

    match tail {
        Some(i) => name[i..]
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '_' | ' ')),
        None => false,
    }
}
