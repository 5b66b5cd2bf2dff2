//! Request validation.
//!
//! # Responsibilities
//! - Classify the request method (preflight, forwardable, denied)
//! - Parse and vet the target URL before anything is fetched
//!
//! # Design Decisions
//! - `ParsedTarget` only exists after a successful parse and scheme check,
//!   so later stages never handle an unvetted URL

use std::fmt;

use axum::http::Method;
use url::Url;

use crate::proxy::error::ProxyError;

/// Outcome of the method gate.
pub enum MethodGate {
    /// OPTIONS: answer the CORS preflight directly, no fetch.
    Preflight,
    /// GET or HEAD: continue down the pipeline.
    Forward,
    /// Anything else: 405.
    Denied,
}

/// Classify the request method.
pub fn gate_method(method: &Method) -> MethodGate {
    if *method == Method::OPTIONS {
        MethodGate::Preflight
    } else if *method == Method::GET || *method == Method::HEAD {
        MethodGate::Forward
    } else {
        MethodGate::Denied
    }
}

/// A validated absolute target URL with an http or https scheme.
#[derive(Debug, Clone)]
pub struct ParsedTarget(Url);

impl ParsedTarget {
    /// The underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ParsedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate the raw `url` query parameter into a [`ParsedTarget`].
pub fn parse_target(raw: Option<&str>) -> Result<ParsedTarget, ProxyError> {
    let raw = raw
        .filter(|value| !value.is_empty())
        .ok_or(ProxyError::MissingUrl)?;

    let url = Url::parse(raw).map_err(|_| ProxyError::InvalidUrl)?;

    match url.scheme() {
        "http" | "https" => Ok(ParsedTarget(url)),
        _ => Err(ProxyError::UnsupportedProtocol),
    }
}
