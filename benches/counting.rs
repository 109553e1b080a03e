use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;
use wordcount_harness::{
    counter::count_words_in_dir,
    generator::{SamplePool, WordSampler, write_sample_file},
    wordlist::Wordlist,
};

fn criterion_benchmark(c: &mut Criterion) {
    let pool = SamplePool {
        basic: Wordlist::from_words([
            "the", "quick", "brown", "fox", "jumps", "over", "a", "lazy", "dog",
        ]),
        full: Some(Wordlist::from_words([
            "abditory",
            "borborygmus",
            "cacoethes",
            "defenestration",
            "eucatastrophe",
        ])),
    };
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("sample_word", |b| {
        b.iter(|| black_box(rng.sample_word(&pool)))
    });

    let dir = tempfile::tempdir().unwrap();
    for i in 0..16 {
        let path = dir.path().join(format!("file_{i}.txt"));
        write_sample_file(&path, &pool, 2000, &mut rng).unwrap();
    }
    c.bench_function("count_words_in_dir", |b| {
        b.iter(|| count_words_in_dir(black_box(dir.path())).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
