//! Route configuration for the RPC API.

use super::handlers::*;
use super::state::RpcState;
use axum::{routing::get, Router};

/// Create the full router with all RPC routes.
pub fn create_router(state: RpcState) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<RpcState> {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/calculate-pi",
            get(calculate_pi_handler).post(calculate_pi_post_handler),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn create_test_state() -> RpcState {
        let mut config = ServiceConfig::default();
        config.estimator.workers = Some(2);
        config.estimator.default_iterations = 10_000;
        RpcState::from_config(&config)
    }

    #[tokio::test]
    async fn test_router_health() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Pi Calculator Service is running");
    }

    #[tokio::test]
    async fn test_router_unknown_route() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calculate-e")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_router_rejects_unsupported_method() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/calculate-pi")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
