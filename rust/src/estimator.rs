//! Request/result types and the [`Estimator`] that ties the sampling paths together.

use crate::error::Result;
use crate::monte_carlo::{
    estimate_parallel_seeded, estimate_sequential_with, SampleCount, Sampler,
};
use std::f64::consts::PI;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::info;

/// Number of workers used when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// A single estimation call: how many samples and which path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationRequest {
    pub sample_count: SampleCount,
    pub parallel: bool,
}

impl EstimationRequest {
    pub fn new(sample_count: u64, parallel: bool) -> Result<Self> {
        Ok(EstimationRequest {
            sample_count: SampleCount::new(sample_count)?,
            parallel,
        })
    }
}

/// Outcome of one estimation, with accuracy and timing metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub sample_count: u64,
    pub estimate: f64,
    pub reference: f64,
    pub absolute_error: f64,
    pub percentage_error: f64,
    pub elapsed: Duration,
    pub parallel: bool,
    pub concurrency_degree: usize,
}

impl EstimationResult {
    /// Derives the error figures from a raw estimate.
    ///
    /// `elapsed` must cover the sampling call only.
    pub fn assemble(
        sample_count: u64,
        estimate: f64,
        elapsed: Duration,
        parallel: bool,
        concurrency_degree: usize,
    ) -> Self {
        let absolute_error = (estimate - PI).abs();

        EstimationResult {
            sample_count,
            estimate,
            reference: PI,
            absolute_error,
            percentage_error: absolute_error / PI * 100.0,
            elapsed,
            parallel,
            concurrency_degree,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }
}

/// Runs estimation requests on the calling thread or a scoped thread pool.
///
/// Holds no state between calls besides its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    workers: usize,
    seed: Option<u64>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator {
    pub fn new() -> Self {
        Estimator {
            workers: default_workers(),
            seed: None,
        }
    }

    /// Worker count for the parallel path. Zero is rejected at run time.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn run(&self, request: &EstimationRequest) -> Result<EstimationResult> {
        let n = request.sample_count.get();

        let start = Instant::now();
        let (estimate, concurrency_degree) = if request.parallel {
            estimate_parallel_seeded(n, self.workers, self.seed)?
        } else {
            let mut sampler = Sampler::for_worker(self.seed, 0);
            (estimate_sequential_with(n, &mut sampler)?, 1)
        };
        let elapsed = start.elapsed();

        let result =
            EstimationResult::assemble(n, estimate, elapsed, request.parallel, concurrency_degree);
        info!(
            iterations = n,
            parallel = request.parallel,
            workers = concurrency_degree,
            estimate = result.estimate,
            elapsed_ms = result.elapsed_ms(),
            "estimation finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;

    #[test]
    fn test_assemble_derives_errors() {
        let result = EstimationResult::assemble(100, 3.0, Duration::from_millis(5), false, 1);

        assert_eq!(result.reference, PI);
        assert!((result.absolute_error - (PI - 3.0)).abs() < 1e-12);
        assert!((result.percentage_error - (PI - 3.0) / PI * 100.0).abs() < 1e-12);
        assert!((result.elapsed_ms() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_assemble_exact_estimate_has_zero_error() {
        let result = EstimationResult::assemble(1, PI, Duration::ZERO, true, 4);
        assert_eq!(result.absolute_error, 0.0);
        assert_eq!(result.percentage_error, 0.0);
        assert_eq!(result.concurrency_degree, 4);
    }

    #[test]
    fn test_request_rejects_out_of_range() {
        assert!(matches!(
            EstimationRequest::new(0, false),
            Err(EstimatorError::InvalidSampleCount { .. })
        ));
        assert!(EstimationRequest::new(crate::MAX_ITERATIONS + 1, true).is_err());
    }

    #[test]
    fn test_run_sequential_reports_single_worker() {
        let estimator = Estimator::new().with_workers(8);
        let request = EstimationRequest::new(10_000, false).unwrap();
        let result = estimator.run(&request).unwrap();

        assert_eq!(result.sample_count, 10_000);
        assert_eq!(result.concurrency_degree, 1);
        assert!(!result.parallel);
        assert!((0.0..=4.0).contains(&result.estimate));
    }

    #[test]
    fn test_run_parallel_reports_workers() {
        let estimator = Estimator::new().with_workers(4);
        let request = EstimationRequest::new(1_000_000, true).unwrap();
        let result = estimator.run(&request).unwrap();

        assert!(result.parallel);
        assert_eq!(result.concurrency_degree, 4);
        assert!(result.absolute_error < 0.05);
    }

    #[test]
    fn test_run_with_zero_workers_fails() {
        let estimator = Estimator::new().with_workers(0);
        let request = EstimationRequest::new(10, true).unwrap();
        assert_eq!(
            estimator.run(&request),
            Err(EstimatorError::InvalidWorkerCount)
        );
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let estimator = Estimator::new().with_workers(3).with_seed(Some(99));
        let request = EstimationRequest::new(50_000, true).unwrap();

        let a = estimator.run(&request).unwrap();
        let b = estimator.run(&request).unwrap();
        assert_eq!(a.estimate, b.estimate);

        let request = EstimationRequest::new(50_000, false).unwrap();
        let a = estimator.run(&request).unwrap();
        let b = estimator.run(&request).unwrap();
        assert_eq!(a.estimate, b.estimate);
    }

    #[test]
    fn test_default_workers_is_positive() {
        assert!(default_workers() >= 1);
        assert_eq!(Estimator::default().workers(), default_workers());
    }
}
