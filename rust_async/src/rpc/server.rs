//! RPC server implementation.

use super::routes::create_router;
use super::state::RpcState;
use crate::config::ServiceConfig;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors from the RPC server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Handle for controlling a running RPC server.
pub struct RpcServerHandle {
    /// Task handle for the server.
    task: JoinHandle<()>,
    /// Address actually bound (resolves port 0).
    local_addr: SocketAddr,
    /// Fires graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RpcServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and let in-flight requests finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Abort the server.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the server to finish.
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        self.task.await
    }
}

/// HTTP server for the π estimator.
pub struct RpcServer {
    listen_addr: SocketAddr,
    state: RpcState,
}

impl RpcServer {
    pub fn new(listen_addr: SocketAddr, state: RpcState) -> Self {
        Self { listen_addr, state }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.server.listen_addr, RpcState::from_config(config))
    }

    /// Start the server and return a handle for control.
    pub async fn start(self) -> Result<RpcServerHandle, ServerError> {
        let router = create_router(self.state);

        let listener = tokio::net::TcpListener::bind(self.listen_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "RPC server listening");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
                info!("RPC server shutting down");
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(error = ?e, "RPC server error");
            }
        });

        Ok(RpcServerHandle {
            task,
            local_addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}
