use crate::error::{EstimatorError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::ops::Range;
use std::thread;
use tracing::debug;

/// Upper bound on the number of samples a single estimation may draw.
pub const MAX_ITERATIONS: u64 = 100_000_000;

// Golden-ratio stride, keeps per-worker seeds far apart in the seed space.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A validated number of samples, always within `[1, MAX_ITERATIONS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleCount(u64);

impl SampleCount {
    pub fn new(count: u64) -> Result<Self> {
        if count == 0 || count > MAX_ITERATIONS {
            return Err(EstimatorError::invalid_count(count, MAX_ITERATIONS));
        }
        Ok(SampleCount(count))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for SampleCount {
    type Error = EstimatorError;

    fn try_from(count: i64) -> Result<Self> {
        let count = u64::try_from(count)
            .map_err(|_| EstimatorError::invalid_count(count, MAX_ITERATIONS))?;
        SampleCount::new(count)
    }
}

/// Draws points in the unit square and classifies them against the quarter circle.
///
/// A sampler owns its generator. Concurrent workers each build their own
/// sampler; one is never shared across threads.
#[derive(Debug, Clone)]
pub struct Sampler<R> {
    rng: R,
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Sampler { rng }
    }

    /// Returns true when a fresh point `(x, y)` in `[0, 1)²` satisfies `x² + y² <= 1`.
    pub fn sample(&mut self) -> bool {
        let x: f64 = self.rng.gen();
        let y: f64 = self.rng.gen();
        x * x + y * y <= 1.0
    }

    /// Draws `samples` points and returns how many landed inside.
    pub fn count_inside(&mut self, samples: u64) -> u64 {
        let mut inside = 0;

        for _ in 0..samples {
            if self.sample() {
                inside += 1;
            }
        }

        inside
    }
}

impl Sampler<StdRng> {
    pub fn from_entropy() -> Self {
        Sampler::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Sampler::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler for one worker of a parallel run.
    ///
    /// With a base seed every worker gets its own derived stream, so a run is
    /// reproducible for a fixed `(seed, workers)` pair. Without one the worker
    /// seeds from OS entropy.
    pub fn for_worker(seed: Option<u64>, worker_id: usize) -> Self {
        match seed {
            Some(seed) => Sampler::seeded(worker_seed(seed, worker_id)),
            None => Sampler::from_entropy(),
        }
    }
}

pub fn worker_seed(seed: u64, worker_id: usize) -> u64 {
    seed.wrapping_add((worker_id as u64).wrapping_mul(STREAM_STRIDE))
}

/// Splits `[0, n)` into at most `workers` contiguous chunks.
///
/// Never produces an empty chunk: when `n < workers` only `n` chunks are
/// returned. The first `n % chunks` chunks carry one extra sample.
pub fn partition(n: u64, workers: usize) -> Vec<Range<u64>> {
    if n == 0 || workers == 0 {
        return Vec::new();
    }

    let chunks = (workers as u64).min(n);
    let samples_per_chunk = n / chunks;
    let remainder = n % chunks;

    let mut start = 0;
    (0..chunks)
        .map(|chunk_id| {
            let len = samples_per_chunk + u64::from(chunk_id < remainder);
            let chunk = start..start + len;
            start += len;
            chunk
        })
        .collect()
}

/// Combines per-worker inside counts into `4 * inside / n`.
pub fn aggregate(counts: &[u64], n: u64) -> f64 {
    let total_inside: u64 = counts.iter().sum();
    4.0 * total_inside as f64 / n as f64
}

/// Estimates π on the calling thread with an entropy-seeded generator.
pub fn estimate_sequential(n: u64) -> Result<f64> {
    estimate_sequential_with(n, &mut Sampler::from_entropy())
}

pub fn estimate_sequential_with<R: Rng>(n: u64, sampler: &mut Sampler<R>) -> Result<f64> {
    let n = SampleCount::new(n)?.get();
    let inside = sampler.count_inside(n);
    Ok(aggregate(&[inside], n))
}

/// Estimates π over `workers` OS threads.
///
/// Returns the estimate and the number of workers actually spawned.
pub fn estimate_parallel(n: u64, workers: usize) -> Result<(f64, usize)> {
    estimate_parallel_seeded(n, workers, None)
}

pub fn estimate_parallel_seeded(
    n: u64,
    workers: usize,
    seed: Option<u64>,
) -> Result<(f64, usize)> {
    estimate_parallel_with(n, workers, |worker_id, chunk| {
        Sampler::for_worker(seed, worker_id).count_inside(chunk.end - chunk.start)
    })
}

/// Fork-join driver behind [`estimate_parallel`].
///
/// `count_chunk` receives the worker index and its chunk and returns the
/// inside count for that chunk. Each count is read only after its thread
/// has been joined.
pub fn estimate_parallel_with<F>(n: u64, workers: usize, count_chunk: F) -> Result<(f64, usize)>
where
    F: Fn(usize, Range<u64>) -> u64 + Sync,
{
    let n = SampleCount::new(n)?.get();
    if workers == 0 {
        return Err(EstimatorError::InvalidWorkerCount);
    }

    let chunks = partition(n, workers);
    let concurrency_degree = chunks.len();

    let joined: Vec<thread::Result<u64>> = thread::scope(|scope| {
        let count_chunk = &count_chunk;
        let handles: Vec<_> = chunks
            .into_iter()
            .enumerate()
            .map(|(worker_id, chunk)| {
                debug!(worker_id, start = chunk.start, end = chunk.end, "spawning worker");
                scope.spawn(move || count_chunk(worker_id, chunk))
            })
            .collect();

        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let counts = joined
        .into_iter()
        .enumerate()
        .map(|(worker_id, result)| {
            result.map_err(|payload| {
                EstimatorError::WorkerFailed(format!(
                    "worker {worker_id} panicked: {}",
                    panic_message(&*payload)
                ))
            })
        })
        .collect::<Result<Vec<u64>>>()?;

    Ok((aggregate(&counts, n), concurrency_degree))
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
