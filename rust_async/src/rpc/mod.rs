//! HTTP API for the π estimator.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Liveness probe, fixed text body
//! - `GET /api/calculate-pi?iterations=N&parallel=B` - Run an estimation
//! - `POST /api/calculate-pi` - Same, with a JSON body `{"iterations": N, "parallel": B}`
//!
//! Both fields are optional. Out-of-range `iterations` yield a 400 with a
//! per-field `details` map; any other failure yields a 500.

mod error;
mod handlers;
mod routes;
mod server;
mod state;
mod types;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{RpcServer, RpcServerHandle, ServerError};
pub use state::{IterationLimits, RpcState};
pub use types::*;
