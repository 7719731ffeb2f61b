//! HTTP request handlers for the RPC API.

use super::error::ApiError;
use super::state::RpcState;
use super::types::*;
use crate::monte_carlo;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use pi_estimator::EstimationRequest;

/// Handler for `GET /api/health` - liveness probe.
pub async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}

/// Handler for `GET /api/calculate-pi`.
pub async fn calculate_pi_handler(
    State(state): State<RpcState>,
    query: Result<Query<PiCalculationRequest>, QueryRejection>,
) -> Result<Json<PiCalculationResponse>, ApiError> {
    let Query(request) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    calculate(&state, request).await.map(Json)
}

/// Handler for `POST /api/calculate-pi`.
pub async fn calculate_pi_post_handler(
    State(state): State<RpcState>,
    body: Result<Json<PiCalculationRequest>, JsonRejection>,
) -> Result<Json<PiCalculationResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    calculate(&state, request).await.map(Json)
}

async fn calculate(
    state: &RpcState,
    request: PiCalculationRequest,
) -> Result<PiCalculationResponse, ApiError> {
    let iterations = state.limits.resolve(request.iterations)?;
    let request = EstimationRequest::new(iterations, request.parallel.unwrap_or(false))?;

    let result = monte_carlo::run(&state.estimator, &request).await?;

    Ok(PiCalculationResponse::new(
        &result,
        state.available_processors,
    ))
}
