//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the proxy endpoint
//! - Wire up middleware (request timeout, tracing)
//! - Build the shared upstream client
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ProxyConfig, ProxyEndpointConfig};
use crate::proxy;

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    /// Shared upstream client. Built without decompression so bodies pass
    /// through with whatever encoding upstream sent.
    pub client: reqwest::Client,

    /// Endpoint behaviour (mount path, accept default).
    pub proxy: Arc<ProxyEndpointConfig>,
}

/// HTTP server hosting the proxy endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream client cannot be constructed (TLS backend
    /// initialization).
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;

        let state = AppState {
            client,
            proxy: Arc::new(config.proxy.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.proxy.mount_path, any(proxy::handle))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
