//! Monte Carlo estimation of π.
//!
//! Points are drawn uniformly from the unit square and tested against the
//! quarter circle `x² + y² <= 1`; the hit ratio approaches π/4. Work runs on
//! the calling thread ([`estimate_sequential`]) or is split into contiguous
//! chunks over a fork-join pool of OS threads ([`estimate_parallel`]), each
//! worker owning its own generator.
//!
//! ```no_run
//! use pi_estimator::{EstimationRequest, Estimator};
//!
//! let estimator = Estimator::new().with_workers(4);
//! let request = EstimationRequest::new(1_000_000, true)?;
//! let result = estimator.run(&request)?;
//! println!("π ≈ {} ({} workers)", result.estimate, result.concurrency_degree);
//! # Ok::<(), pi_estimator::EstimatorError>(())
//! ```

pub mod error;
pub mod estimator;
pub mod monte_carlo;

pub use error::{EstimatorError, Result};
pub use estimator::{default_workers, EstimationRequest, EstimationResult, Estimator};
pub use monte_carlo::{
    aggregate, estimate_parallel, estimate_parallel_seeded, estimate_parallel_with,
    estimate_sequential, estimate_sequential_with, partition, worker_seed, SampleCount, Sampler,
    MAX_ITERATIONS,
};
