use thiserror::Error;

/// Errors returned by the estimation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("sample count must be between 1 and {max}, got {count}")]
    InvalidSampleCount { count: i128, max: u64 },

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

impl EstimatorError {
    pub(crate) fn invalid_count(count: impl Into<i128>, max: u64) -> Self {
        EstimatorError::InvalidSampleCount {
            count: count.into(),
            max,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
