//! Error responses for the RPC API.

use super::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pi_estimator::EstimatorError;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn iterations_too_small() -> Self {
        ApiError::Validation {
            field: "iterations",
            message: "Iterations must be at least 1".to_string(),
        }
    }

    pub fn iterations_too_large(max: u64) -> Self {
        ApiError::Validation {
            field: "iterations",
            message: format!("Iterations cannot exceed {max}"),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorResponse {
        let status = self.status().as_u16();

        match self {
            ApiError::Validation { field, message } => ErrorResponse {
                status,
                error: "parameter validation error".to_string(),
                details: Some(BTreeMap::from([(field.to_string(), message)])),
                message: None,
            },
            ApiError::BadRequest(message) => ErrorResponse {
                status,
                error: "parameter validation error".to_string(),
                details: None,
                message: Some(message),
            },
            ApiError::Internal(message) => ErrorResponse {
                status,
                error: "internal server error".to_string(),
                details: None,
                message: Some(message),
            },
        }
    }
}

impl From<EstimatorError> for ApiError {
    fn from(err: EstimatorError) -> Self {
        match err {
            EstimatorError::InvalidSampleCount { count, .. } if count < 1 => {
                ApiError::iterations_too_small()
            }
            EstimatorError::InvalidSampleCount { max, .. } => ApiError::iterations_too_large(max),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, Json(self.into_body())).into_response()
    }
}
