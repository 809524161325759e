//! Seeded run-list generators for benchmarking and cross-checking.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rangebits::{CONTAINER_BITS, Run};

/// Length and spacing of generated runs.
#[derive(Debug, Clone, Copy)]
pub struct RunShape {
    /// Longest run, in values (each run covers `1..=max_len` values)
    pub max_len: u32,
    /// Gaps after each run are drawn from `0..max_gap`
    pub max_gap: u32,
}

impl Default for RunShape {
    fn default() -> Self {
        Self {
            max_len: 71,
            max_gap: 128,
        }
    }
}

/// A generated run list.
#[derive(Debug, Clone)]
pub struct Workload {
    pub runs: Vec<Run>,
    /// Set when the 16-bit domain ran out before `count` runs were produced
    pub truncated: bool,
}

/// Generate up to `count` ascending, non-overlapping runs.
///
/// Runs start at 0; a gap of zero yields adjacent runs. Generation stops
/// early rather than emit a run that crosses the end of the 16-bit domain.
pub fn generate_runs(count: usize, shape: RunShape, seed: u64) -> Workload {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // every run covers at least one value, so no more than CONTAINER_BITS fit
    let mut runs = Vec::with_capacity(count.min(CONTAINER_BITS));
    let mut base = 0usize;

    for _ in 0..count {
        let len = rng.gen_range(1..=shape.max_len.max(1)) as usize;
        if base + len > CONTAINER_BITS {
            return Workload {
                runs,
                truncated: true,
            };
        }
        runs.push(Run::new(base as u16, (len - 1) as u16));
        base += len + rng.gen_range(0..shape.max_gap.max(1)) as usize;
    }

    Workload {
        runs,
        truncated: false,
    }
}

/// Bit-by-bit rendition of a run list, used as the ground truth in `verify`.
pub fn reference_bitmap(words: usize, runs: &[Run]) -> Vec<u64> {
    let mut bitmap = vec![0u64; words];
    for run in runs {
        for pos in run.start()..run.end() {
            bitmap[(pos / 64) as usize] |= 1u64 << (pos % 64);
        }
    }
    bitmap
}
