//! Status endpoint listener and serve loop.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{Result, StatusError};
use crate::players::PlayerSource;

/// A bound status endpoint, ready to serve.
///
/// Binding and serving are split so that bind failures (port already in
/// use) surface before the caller hands control to the serve loop.
#[derive(Debug)]
pub struct StatusServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl StatusServer {
    /// Bind the address from `config` and register the player list handler.
    pub async fn bind(config: &Config, source: Arc<dyn PlayerSource>) -> Result<Self> {
        let addr = config.socket_addr()?;
        Self::bind_addr(addr, source).await
    }

    /// Bind an explicit address. Port 0 picks an ephemeral port.
    pub async fn bind_addr(addr: SocketAddr, source: Arc<dyn PlayerSource>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await.map_err(|source| {
            error!("Failed to bind {}: {}", addr, source);
            StatusError::Bind { addr, source }
        })?;
        let local_addr = listener.local_addr().map_err(StatusError::Serve)?;

        info!(
            source = source.name(),
            "Status endpoint listening on {}", local_addr
        );

        Ok(Self {
            listener,
            router: create_router(AppState::new(source)),
            local_addr,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until the process ends. Only returns on a serve-loop error.
    pub async fn serve(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .map_err(StatusError::Serve)
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(StatusError::Serve)?;
        info!("Status endpoint on {} shut down", self.local_addr);
        Ok(())
    }
}
