//! Proxy request pipeline.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → validate.rs (method gate, target URL parse, scheme check)
//!     → headers.rs  (allowlist filter, accept default, referer strip)
//!     → fetch.rs    (streaming upstream request, correlation id)
//!     → relay.rs    (status/header copy, CORS overlay, body stream)
//! Client response
//! ```
//!
//! # Design Decisions
//! - Every upstream status (including 4xx/5xx) is relayed verbatim; the
//!   error path is reserved for transport-level failures
//! - No request state outlives the handler invocation
//! - The body is never buffered; backpressure flows from the client socket
//!   to the upstream socket through the chunk stream

pub mod error;
pub mod fetch;
pub mod headers;
pub mod relay;
pub mod validate;

pub use error::ProxyError;
pub use fetch::CorrelationId;

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Query parameters accepted by the proxy endpoint.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Absolute URL of the resource to fetch.
    url: Option<String>,
}

/// Handle one proxy request end to end.
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<ProxyQuery>,
    request_headers: HeaderMap,
) -> Response {
    let start = Instant::now();

    match validate::gate_method(&method) {
        validate::MethodGate::Preflight => {
            metrics::record_request(method.as_str(), 204, "preflight", start);
            return relay::preflight_response();
        }
        validate::MethodGate::Denied => {
            return reject(ProxyError::MethodNotAllowed, &method, start);
        }
        validate::MethodGate::Forward => {}
    }

    let target = match validate::parse_target(query.url.as_deref()) {
        Ok(target) => target,
        Err(e) => return reject(e, &method, start),
    };

    let correlation_id = CorrelationId::new();
    let forwarded = headers::build_forward_headers(
        &request_headers,
        &state.proxy.mount_path,
        &state.proxy.default_accept,
    );

    let upstream = match fetch::fetch_upstream(
        &state.client,
        method.clone(),
        &target,
        forwarded,
        &correlation_id,
    )
    .await
    {
        Ok(upstream) => upstream,
        Err(e) => {
            let response = e.into_response();
            metrics::record_request(
                method.as_str(),
                response.status().as_u16(),
                "upstream_error",
                start,
            );
            return response;
        }
    };

    let response = relay::relay(upstream, &method, &correlation_id).await;
    metrics::record_request(method.as_str(), response.status().as_u16(), "relayed", start);
    response
}

fn reject(error: ProxyError, method: &Method, start: Instant) -> Response {
    tracing::warn!(method = %method, error = %error, "Rejected proxy request");
    let response = error.into_response();
    metrics::record_request(method.as_str(), response.status().as_u16(), "rejected", start);
    response
}
