use pi_estimator::{
    aggregate, estimate_sequential_with, partition, EstimationRequest, EstimationResult,
    Estimator, EstimatorError, SampleCount, Sampler,
};
use std::time::Instant;
use tokio::task::{self, JoinError};
use tracing::{debug, info};

fn task_failed(task_id: usize, err: JoinError) -> EstimatorError {
    EstimatorError::WorkerFailed(format!("task {task_id} failed: {err}"))
}

/// Estimates π over `num_tasks` blocking tasks on the tokio blocking pool.
///
/// Uses the same partition as the threaded path. Returns the estimate and the
/// number of tasks actually spawned.
pub async fn estimate_parallel_async(
    total_samples: u64,
    num_tasks: usize,
    seed: Option<u64>,
) -> Result<(f64, usize), EstimatorError> {
    let total_samples = SampleCount::new(total_samples)?.get();
    if num_tasks == 0 {
        return Err(EstimatorError::InvalidWorkerCount);
    }

    let chunks = partition(total_samples, num_tasks);
    let mut handles = Vec::with_capacity(chunks.len());

    for (task_id, chunk) in chunks.into_iter().enumerate() {
        debug!(task_id, start = chunk.start, end = chunk.end, "spawning sampling task");

        let handle = task::spawn_blocking(move || {
            Sampler::for_worker(seed, task_id).count_inside(chunk.end - chunk.start)
        });

        handles.push(handle);
    }

    let concurrency_degree = handles.len();
    let mut counts = Vec::with_capacity(concurrency_degree);
    for (task_id, handle) in handles.into_iter().enumerate() {
        counts.push(handle.await.map_err(|err| task_failed(task_id, err))?);
    }

    Ok((aggregate(&counts, total_samples), concurrency_degree))
}

/// Runs the sequential path on the blocking pool so the caller's runtime
/// thread stays free.
pub async fn estimate_sequential_async(
    total_samples: u64,
    seed: Option<u64>,
) -> Result<f64, EstimatorError> {
    task::spawn_blocking(move || {
        estimate_sequential_with(total_samples, &mut Sampler::for_worker(seed, 0))
    })
    .await
    .map_err(|err| task_failed(0, err))?
}

/// Async counterpart of [`Estimator::run`].
pub async fn run(
    estimator: &Estimator,
    request: &EstimationRequest,
) -> Result<EstimationResult, EstimatorError> {
    let n = request.sample_count.get();

    let start = Instant::now();
    let (estimate, concurrency_degree) = if request.parallel {
        estimate_parallel_async(n, estimator.workers(), estimator.seed()).await?
    } else {
        (estimate_sequential_async(n, estimator.seed()).await?, 1)
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
