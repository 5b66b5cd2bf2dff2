//! Response relaying.
//!
//! # Responsibilities
//! - Copy upstream status and headers to the client response
//! - Overlay CORS headers after the copy, so upstream cannot suppress them
//! - Stream the body without buffering; suppress it for HEAD
//!
//! # Design Decisions
//! - The first body chunk is polled before the response is committed, so a
//!   stream that fails immediately still yields a clean 502; later failures
//!   can only terminate the connection
//! - Hop-by-hop headers are not copied: the client connection negotiates its
//!   own framing, and the decoded chunk stream no longer matches upstream's
//!   transfer encoding

use axum::body::Body;
use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
    CONNECTION, TRANSFER_ENCODING,
};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::{future, stream, StreamExt};

use crate::proxy::error::ProxyError;
use crate::proxy::fetch::CorrelationId;

/// Connection-scoped headers never copied from the upstream response.
const HOP_BY_HOP: [HeaderName; 2] = [TRANSFER_ENCODING, CONNECTION];

/// Header names a range-aware client must be able to read across origins.
const EXPOSED_HEADERS: &str = "Accept-Ranges, Content-Length, Content-Range";

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Range"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,HEAD,OPTIONS"),
    );
}

/// Answer an OPTIONS preflight: 204, no body, permissive CORS headers.
pub fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors(response.headers_mut());
    response
}

/// Write the client response for an upstream response.
///
/// The upstream body is consumed exactly once, chunk by chunk; a paused
/// client read pauses the upstream read, and dropping the response aborts
/// the upstream connection.
pub async fn relay(
    upstream: reqwest::Response,
    method: &Method,
    correlation_id: &CorrelationId,
) -> Response {
    let status = upstream.status();

    let mut headers = HeaderMap::new();
    for (name, value) in upstream.headers() {
        if HOP_BY_HOP.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    apply_cors(&mut headers);
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );

    let body = if *method == Method::HEAD {
        Body::empty()
    } else {
        let mut chunks = upstream.bytes_stream();
        match chunks.next().await {
            None => Body::empty(),
            Some(Err(e)) => {
                // Nothing has been committed to the client yet.
                tracing::error!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "Stream error"
                );
                return ProxyError::Stream(e).into_response();
            }
            Some(Ok(first)) => {
                let id = correlation_id.to_string();
                let rest = chunks.inspect(move |chunk| {
                    if let Err(e) = chunk {
                        tracing::error!(
                            correlation_id = %id,
                            error = %e,
                            "Stream error, terminating response"
                        );
                    }
                });
                Body::from_stream(stream::once(future::ready(Ok(first))).chain(rest))
            }
        }
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
