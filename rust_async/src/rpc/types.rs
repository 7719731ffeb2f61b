//! Request and response payloads.

use pi_estimator::EstimationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /api/health`.
pub const HEALTH_MESSAGE: &str = "Pi Calculator Service is running";

/// Estimation parameters, read from the query string or a JSON body.
///
/// `iterations` is signed so that negative input reaches validation instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiCalculationRequest {
    #[serde(default)]
    pub iterations: Option<i64>,
    #[serde(default)]
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiCalculationResponse {
    pub iterations: u64,
    pub pi_value: f64,
    pub actual_pi: f64,
    pub error: f64,
    pub error_percentage: f64,
    pub execution_time_ms: f64,
    pub parallel: bool,
    /// Parallelism available on the host.
    pub available_processors: usize,
    /// Workers that actually ran this estimation.
    pub concurrency_degree: usize,
}

impl PiCalculationResponse {
    pub fn new(result: &EstimationResult, available_processors: usize) -> Self {
        Self {
            iterations: result.sample_count,
            pi_value: result.estimate,
            actual_pi: result.reference,
            error: result.absolute_error,
            error_percentage: result.percentage_error,
            execution_time_ms: result.elapsed_ms(),
            parallel: result.parallel,
            available_processors,
            concurrency_degree: result.concurrency_degree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
