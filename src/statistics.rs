use std::{
    collections::HashMap,
    sync::{
        LazyLock, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

pub static STATISTICS: LazyLock<Statistics> = LazyLock::new(Statistics::default);

/// Shared counters and labelled timings, written by the worker thread and
/// read by the draw loop.
#[derive(Default)]
pub struct Statistics {
    pub draws: DrawStats,
    timings: Mutex<HashMap<&'static str, Timing>>,
}

/// How many sampled words came from each wordlist.
#[derive(Default)]
pub struct DrawStats {
    basic: AtomicU64,
    full: AtomicU64,
}

impl DrawStats {
    pub fn add_basic(&self) {
        self.basic.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_full(&self) {
        self.full.fetch_add(1, Ordering::Relaxed);
    }

    pub fn basic(&self) -> u64 {
        self.basic.load(Ordering::Relaxed)
    }

    pub fn full(&self) -> u64 {
        self.full.load(Ordering::Relaxed)
    }

    /// Fraction of draws that hit the full list, 0.0 before any draw.
    pub fn full_share(&self) -> f64 {
        let basic = self.basic();
        let full = self.full();
        if basic + full == 0 {
            return 0.0;
        }
        full as f64 / (basic + full) as f64
    }
}

#[derive(Default, Clone, Copy)]
struct Timing {
    count: u64,
    ns: u64,
}

impl Statistics {
    pub fn record(&self, name: &'static str, time: Duration) {
        let mut timings = self.timings.lock().unwrap();
        let timing = timings.entry(name).or_default();
        timing.count += 1;
        timing.ns += time.as_nanos() as u64;
    }

    /// Returns (label, average ops/s) for every label recorded so far.
    pub fn get_throughputs(&self) -> Vec<(String, f64)> {
        self.timings
            .lock()
            .unwrap()
            .iter()
            .map(|(name, timing)| {
                let secs = timing.ns as f64 / 1e9;
                (name.to_string(), timing.count as f64 / secs)
            })
            .collect()
    }
}

#[macro_export]
macro_rules! measure {
    ($name:literal $body:block) => {{
        let start = ::std::time::Instant::now();
        let out = $body;
        $crate::statistics::STATISTICS.record($name, start.elapsed());
        out
    }};
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DrawStats, Statistics};

    #[test]
    fn full_share() {
        let draws = DrawStats::default();
        assert_eq!(draws.full_share(), 0.0);

        for _ in 0..8 {
            draws.add_basic();
        }
        draws.add_full();
        draws.add_full();
        assert!((draws.full_share() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn record_accumulates() {
        let stats = Statistics::default();
        stats.record("work", Duration::from_millis(500));
        stats.record("work", Duration::from_millis(500));

        let throughputs = stats.get_throughputs();
        assert_eq!(throughputs.len(), 1);
        assert_eq!(throughputs[0].0, "work");
        assert!((throughputs[0].1 - 2.0).abs() < 1e-6);
    }
}
