//! HTTP service and tokio-based execution for the Monte Carlo π estimator.
//!
//! The sampling core lives in [`pi_estimator`]; this crate fans the parallel
//! path out over `spawn_blocking` tasks and serves it through axum.

pub mod config;
pub mod monte_carlo;
pub mod rpc;

pub use config::{ConfigError, ServiceConfig};
pub use rpc::{create_router, RpcServer, RpcServerHandle, RpcState};
