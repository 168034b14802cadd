use std::{io::Read, path::Path};

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Entry;

const COL_WORD: usize = 0;
const COL_RANK: usize = 1;

lazy_static! {
    static ref RE_SPACES: Regex = Regex::new(r"\s+").expect("error compiling whitespace regex");
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
}

/// Read a word list from a CSV file.
///
/// Rows are `word,rank` with no header. The rank column may be omitted (rank 0).
/// Right-to-left lists are reversed into index order when `rtl` is set.
pub fn import_csv(file_path: &Path, rtl: bool) -> Result<Vec<Entry>, ImportError> {
    log::info!("importing words from {} ...", file_path.display());

    let file = std::fs::File::open(file_path)?;
    let entries = read_words(file, rtl)?;

    log::info!("read {} words from {}", entries.len(), file_path.display());
    Ok(entries)
}

/// Read a CSV word list from any reader. See [`import_csv`].
pub fn read_words<R: Read>(rd: R, rtl: bool) -> Result<Vec<Entry>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rd);

    let mut entries = Vec::new();
    for (n, result) in reader.records().enumerate() {
        let record = result?;
        if let Some(entry) = read_entry(&record, n + 1, rtl)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn read_entry(
    record: &csv::StringRecord,
    line: usize,
    rtl: bool,
) -> Result<Option<Entry>, ImportError> {
    let word = clean_string(record.get(COL_WORD).unwrap_or(""));
    if word.is_empty() {
        log::warn!("line {}: skipping empty word", line);
        return Ok(None);
    }

    let rank_str = record.get(COL_RANK).unwrap_or("").trim();
    let rank = if rank_str.is_empty() {
        0
    } else {
        rank_str.parse::<i32>().map_err(|_| {
            ImportError::Validation(format!(
                "line {}: invalid rank '{}' in column {}",
                line, rank_str, COL_RANK
            ))
        })?
    };

    Ok(Some(if rtl {
        Entry::rtl(&word, rank)
    } else {
        Entry::new(word, rank)
    }))
}

fn clean_string(s: &str) -> String {
    RE_SPACES.replace_all(s.trim(), " ").to_string()
}
