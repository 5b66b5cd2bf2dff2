//! Streaming CORS proxy for remote PDF resources.
//!
//! Browser-hosted PDF viewers cannot fetch documents from arbitrary origins:
//! the remote server rarely sends the CORS headers the browser demands, and
//! range requests (which viewers use to lazily load page data) need those
//! headers exposed explicitly. This crate exposes a single endpoint that
//! fetches the target resource on the viewer's behalf, relays the upstream
//! response verbatim, and overlays permissive CORS headers on the way back.
//!
//! # Request Pipeline
//!
//! ```text
//! Client Request
//!     → http/server.rs   (Axum router, timeout + trace layers)
//!     → proxy/validate.rs (method gate, target URL parse + scheme check)
//!     → proxy/headers.rs  (allowlist filter, accept default, referer strip)
//!     → proxy/fetch.rs    (streaming upstream request, correlation id)
//!     → proxy/relay.rs    (status/header copy, CORS overlay, body stream)
//! Client Response
//! ```
//!
//! Failures at any stage map to client responses through `proxy/error.rs`;
//! config, metrics, and shutdown are cross-cutting subsystems.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
