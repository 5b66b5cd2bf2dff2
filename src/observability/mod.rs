//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → tracing events (correlation id, target, upstream status)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The correlation id flows through every log event of a request
//! - Metrics are cheap (atomic increments); recording is a no-op until the
//!   exporter is installed, so tests need no setup

pub mod metrics;
