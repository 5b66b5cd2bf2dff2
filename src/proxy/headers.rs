//! Outbound header filtering.
//!
//! # Responsibilities
//! - Build the upstream header set from a fixed allowlist
//! - Default `accept` to a PDF-preferring value when the client sent none
//! - Drop a `referer` that points back at the proxy itself
//!
//! # Design Decisions
//! - The allowlist is the single source of truth: nothing outside it is ever
//!   forwarded, so hop-by-hop and credential headers cannot leak upstream
//! - Values are copied verbatim; the only mutation is the accept default and
//!   the referer strip

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, REFERER};

/// Request headers forwarded to the upstream resource, and nothing else.
pub const FORWARDED_HEADERS: [HeaderName; 6] = [
    HeaderName::from_static("range"),
    HeaderName::from_static("accept"),
    HeaderName::from_static("accept-encoding"),
    HeaderName::from_static("user-agent"),
    HeaderName::from_static("referer"),
    HeaderName::from_static("accept-language"),
];

/// Build the header set sent upstream from the incoming request headers.
///
/// A `referer` whose value contains `mount_path` is dropped so the upstream
/// never sees a self-referential referer when the proxy is embedded in a page
/// that links back to it.
pub fn build_forward_headers(
    incoming: &HeaderMap,
    mount_path: &str,
    default_accept: &str,
) -> HeaderMap {
    let mut forwarded = HeaderMap::new();

    for name in &FORWARDED_HEADERS {
        if let Some(value) = incoming.get(name) {
            forwarded.insert(name.clone(), value.clone());
        }
    }

    if !forwarded.contains_key(ACCEPT) {
        if let Ok(value) = HeaderValue::from_str(default_accept) {
            forwarded.insert(ACCEPT, value);
        }
    }

    let self_referential = forwarded
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(mount_path));
    if self_referential {
        forwarded.remove(REFERER);
    }

    forwarded
}
