use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::Arc,
};

use rand::Rng;

use crate::{measure, statistics::STATISTICS, wordlist::Wordlist};

/// Word population the generator draws from. When a full list is present
/// roughly one draw in five comes from it.
pub struct SamplePool {
    pub basic: Wordlist,
    pub full: Option<Wordlist>,
}

/// Sampling lives on the rng so tests can drive it with a seeded one.
pub trait WordSampler {
    fn sample_word<'a>(&mut self, pool: &'a SamplePool) -> &'a Arc<str>;
}

impl<T: Rng> WordSampler for T {
    /// Roll a uniform integer in [1, 10]: 1 and 2 pick from the full list,
    /// the other eight rolls pick from the basic list.
    fn sample_word<'a>(&mut self, pool: &'a SamplePool) -> &'a Arc<str> {
        if let Some(full) = &pool.full {
            if self.random_range(1..=10) <= 2 {
                STATISTICS.draws.add_full();
                return full.choose(self);
            }
        }
        STATISTICS.draws.add_basic();
        pool.basic.choose(self)
    }
}

/// Writes one generated file: `words_per_file` sampled words, each followed
/// by a single space, then a newline.
pub fn write_sample_file(
    path: &Path,
    pool: &SamplePool,
    words_per_file: u64,
    rng: &mut impl Rng,
) -> color_eyre::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    measure! {
        "generate.write_file"
        {
            for _ in 0..words_per_file {
                write!(writer, "{} ", rng.sample_word(pool))?;
            }
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::{SeedableRng, rngs::StdRng};

    use super::{SamplePool, WordSampler, write_sample_file};
    use crate::wordlist::Wordlist;

    fn two_list_pool() -> SamplePool {
        SamplePool {
            basic: Wordlist::from_words(["cat", "dog", "bird", "fish"]),
            full: Some(Wordlist::from_words(["axolotl", "quokka"])),
        }
    }

    #[test]
    fn generated_file_has_configured_word_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_0.txt");
        let pool = two_list_pool();
        let mut rng = StdRng::seed_from_u64(3);

        write_sample_file(&path, &pool, 250, &mut rng).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert_eq!(content.split_whitespace().count(), 250);
    }

    #[test]
    fn generated_words_come_from_the_pool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_0.txt");
        let pool = two_list_pool();
        let mut rng = StdRng::seed_from_u64(4);

        write_sample_file(&path, &pool, 500, &mut rng).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let full = pool.full.as_ref().unwrap();
        for word in content.split_whitespace() {
            assert!(
                pool.basic.contains(word) || full.contains(word),
                "unexpected word {word:?}"
            );
        }
    }

    #[test]
    fn full_list_gets_about_a_fifth_of_draws() {
        // The lists are disjoint, so membership tells which one was drawn.
        let pool = two_list_pool();
        let full = pool.full.as_ref().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let draws = 50_000;
        let mut from_full = 0u64;
        for _ in 0..draws {
            if full.contains(rng.sample_word(&pool)) {
                from_full += 1;
            }
        }

        let share = from_full as f64 / draws as f64;
        assert!((0.18..=0.22).contains(&share), "share was {share}");
    }

    #[test]
    fn single_list_pool_samples_uniformly_from_basic() {
        let pool = SamplePool {
            basic: Wordlist::from_words(["red", "green", "blue"]),
            full: None,
        };
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1_000 {
            assert!(pool.basic.contains(rng.sample_word(&pool)));
        }
    }
}
