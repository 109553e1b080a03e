use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use color_eyre::eyre::{WrapErr, eyre};

use crate::measure;

pub type WordCounts = HashMap<String, u64>;

/// Regular files directly under `dir`. Not recursive, subdirectories are
/// skipped.
pub fn data_files(dir: &Path) -> color_eyre::Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).wrap_err_with(|| format!("reading directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

/// Tokenizes every line of `path` on whitespace and bumps a counter per
/// token.
pub fn count_words_in_file(path: &Path, counts: &mut WordCounts) -> color_eyre::Result<()> {
    let reader = BufReader::new(
        File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?,
    );
    measure! {
        "verify.count_file"
        {
            for line in reader.lines() {
                for word in line?.split_whitespace() {
                    *counts.entry(word.to_string()).or_insert(0) += 1;
                }
            }
        }
    }
    Ok(())
}

/// Ground-truth counts for a whole directory. Accumulation commutes, so the
/// listing order never changes the result.
pub fn count_words_in_dir(dir: &Path) -> color_eyre::Result<WordCounts> {
    let mut counts = WordCounts::new();
    for path in data_files(dir)? {
        count_words_in_file(&path, &mut counts)?;
    }
    Ok(counts)
}

/// Parses `word count` pairs, one per line. Anything other than exactly two
/// whitespace-separated tokens is a hard error. A word repeated on a later
/// line overwrites the earlier count.
pub fn parse_program_output(path: &Path) -> color_eyre::Result<WordCounts> {
    let reader = BufReader::new(
        File::open(path).wrap_err_with(|| format!("opening program output {}", path.display()))?,
    );
    let mut counts = WordCounts::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let (Some(word), Some(count), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(eyre!(
                "{}:{}: expected `word count`, got {line:?}",
                path.display(),
                lineno + 1
            ));
        };
        let count: u64 = count.parse().wrap_err_with(|| {
            format!("{}:{}: count {count:?} is not a number", path.display(), lineno + 1)
        })?;
        counts.insert(word.to_string(), count);
    }
    Ok(counts)
}

/// A word whose ground-truth count the program output failed to match.
/// `got` is 0 when the word is missing entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub word: String,
    pub expected: u64,
    pub got: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatch for word '{}': expected {}, got {}",
            self.word, self.expected, self.got
        )
    }
}

/// Checks every ground-truth word against the program output, sorted by word
/// so the report is deterministic. Words present only in the program output
/// are not checked.
pub fn compare_counts(expected: &WordCounts, got: &WordCounts) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    for (word, &count) in expected {
        let found = got.get(word).copied();
        if found != Some(count) {
            mismatches.push(Mismatch {
                word: word.clone(),
                expected: count,
                got: found.unwrap_or(0),
            });
        }
    }
    mismatches.sort_by(|a, b| a.word.cmp(&b.word));
    mismatches
}
