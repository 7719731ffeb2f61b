//! Shared state for RPC handlers.

use super::error::ApiError;
use crate::config::ServiceConfig;
use pi_estimator::{default_workers, Estimator};

/// Request-level bounds on the sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimits {
    pub default_iterations: u64,
    pub max_iterations: u64,
}

impl IterationLimits {
    /// Applies the default and checks `[1, max_iterations]`.
    pub fn resolve(&self, iterations: Option<i64>) -> Result<u64, ApiError> {
        let Some(iterations) = iterations else {
            return Ok(self.default_iterations);
        };

        if iterations < 1 {
            return Err(ApiError::iterations_too_small());
        }
        // Positive i64 always fits in u64.
        let iterations = iterations as u64;
        if iterations > self.max_iterations {
            return Err(ApiError::iterations_too_large(self.max_iterations));
        }

        Ok(iterations)
    }
}

/// Immutable per-service state; handlers clone it freely.
#[derive(Debug, Clone, Copy)]
pub struct RpcState {
    pub estimator: Estimator,
    pub limits: IterationLimits,
    pub available_processors: usize,
}

impl RpcState {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            estimator: config.build_estimator(),
            limits: IterationLimits {
                default_iterations: config.estimator.default_iterations,
                max_iterations: config.estimator.max_iterations,
            },
            available_processors: default_workers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> IterationLimits {
        IterationLimits {
            default_iterations: 1_000_000,
            max_iterations: 100_000_000,
        }
    }

    #[test]
    fn test_resolve_default() {
        assert_eq!(limits().resolve(None).unwrap(), 1_000_000);
    }

    #[test]
    fn test_resolve_bounds() {
        assert_eq!(limits().resolve(Some(1)).unwrap(), 1);
        assert_eq!(limits().resolve(Some(100_000_000)).unwrap(), 100_000_000);
        assert!(matches!(
            limits().resolve(Some(0)),
            Err(ApiError::Validation { field: "iterations", .. })
        ));
        assert!(matches!(
            limits().resolve(Some(-10)),
            Err(ApiError::Validation { .. })
        ));
        assert!(matches!(
            limits().resolve(Some(200_000_000)),
            Err(ApiError::Validation { .. })
        ));
    }

    #[test]
    fn test_state_from_config() {
        let mut config = ServiceConfig::default();
        config.estimator.workers = Some(2);
        config.estimator.max_iterations = 500;
        config.estimator.default_iterations = 100;

        let state = RpcState::from_config(&config);
        assert_eq!(state.estimator.workers(), 2);
        assert_eq!(state.limits.max_iterations, 500);
        assert!(state.available_processors >= 1);
        assert!(state.limits.resolve(Some(501)).is_err());
    }
}
