use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use color_eyre::eyre::{WrapErr, eyre};
use rand::Rng;

/// Sampling population loaded from a flat file, one word per line.
/// Duplicates are kept, they just weight the draw.
pub struct Wordlist {
    words: Vec<Arc<str>>,
}

impl Wordlist {
    pub fn load(path: impl AsRef<Path>) -> color_eyre::Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(
            File::open(path).wrap_err_with(|| format!("opening wordlist {}", path.display()))?,
        );
        let mut words = Vec::with_capacity(2048);
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            words.push(Arc::from(line.as_str()));
        }
        if words.is_empty() {
            return Err(eyre!("wordlist {} has no words", path.display()));
        }
        Ok(Self { words })
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| Arc::from(w.as_ref())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniform draw. Panics on an empty list, `load` never produces one.
    pub fn choose(&self, rng: &mut impl Rng) -> &Arc<str> {
        &self.words[rng.random_range(0..self.words.len())]
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| &**w == word)
    }
}
