//! Upstream fetching.
//!
//! # Responsibilities
//! - Issue the streaming HTTP request to the target resource
//! - Generate the per-request correlation id and log both sides of the call
//!
//! # Design Decisions
//! - Compression is never decoded: the client crate is built without
//!   decompression features, so `content-encoding`/`content-length` stay
//!   consistent with the relayed bytes
//! - Upstream 4xx/5xx are valid responses to relay; only transport failures
//!   (DNS, connect, TLS, timeout) surface as errors here

use std::fmt;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};

use crate::proxy::error::ProxyError;
use crate::proxy::validate::ParsedTarget;

/// Short random identifier correlating all log events of one request.
pub struct CorrelationId(String);

impl CorrelationId {
    const LEN: usize = 8;
    const ALPHABET: &'static [u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Generate a fresh id.
    pub fn new() -> Self {
        let id = (0..Self::LEN)
            .map(|_| Self::ALPHABET[fastrand::usize(..Self::ALPHABET.len())] as char)
            .collect();
        Self(id)
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Perform the streaming request to the target resource.
///
/// Returns the upstream response with its body unread; the relay stage
/// consumes it chunk by chunk.
pub async fn fetch_upstream(
    client: &reqwest::Client,
    method: Method,
    target: &ParsedTarget,
    headers: HeaderMap,
    correlation_id: &CorrelationId,
) -> Result<reqwest::Response, ProxyError> {
    tracing::info!(
        correlation_id = %correlation_id,
        target = %target,
        "Fetching upstream resource"
    );

    let response = client
        .request(method, target.as_url().clone())
        .headers(headers)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(
                correlation_id = %correlation_id,
                target = %target,
                error = %e,
                "Failed proxy request"
            );
            ProxyError::UpstreamUnreachable(e)
        })?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    tracing::info!(
        correlation_id = %correlation_id,
        status = %response.status(),
        content_type = %content_type,
        "Upstream responded"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_ids_are_short_and_distinct() {
        let a = CorrelationId::new();
        let b = CorrelationId::new();
        assert_eq!(a.to_string().len(), CorrelationId::LEN);
        assert!(a
            .to_string()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(a.to_string(), b.to_string());
    }
}
