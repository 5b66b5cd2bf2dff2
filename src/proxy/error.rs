//! Error taxonomy for the proxy pipeline.
//!
//! Each variant maps to exactly one client-visible response. The `Display`
//! text doubles as the response body, so clients see the same short messages
//! regardless of which stage failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A terminal failure for one proxy request. No retry is attempted.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Request method outside GET/HEAD/OPTIONS.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The `url` query parameter was absent or empty.
    #[error("Missing url query parameter")]
    MissingUrl,

    /// The `url` query parameter did not parse as an absolute URL.
    #[error("Invalid url")]
    InvalidUrl,

    /// The target URL scheme was not http or https.
    #[error("Unsupported protocol")]
    UnsupportedProtocol,

    /// Transport-level failure (DNS, connect, TLS, timeout) with no upstream
    /// response to relay.
    #[error("Failed to reach upstream resource")]
    UpstreamUnreachable(#[source] reqwest::Error),

    /// The upstream body stream failed before any bytes reached the client.
    #[error("Proxy stream error")]
    Stream(#[source] reqwest::Error),
}

impl ProxyError {
    /// Client-visible status code for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingUrl | ProxyError::InvalidUrl | ProxyError::UnsupportedProtocol => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::UpstreamUnreachable(_) | ProxyError::Stream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
